//! `tessel check`: structural validation only.

use tessel_diagnostics::DiagnosticSink;
use tessel_netlist::{load_design, validate_all};
use tessel_vhdl::codes;

use crate::report::report;
use crate::{CheckArgs, GlobalArgs};

/// Runs the `tessel check` command.
///
/// Every invariant violation becomes an error diagnostic. Returns exit
/// code 0 for a valid design and 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (design, _interner) = load_design(&args.design)?;

    let sink = DiagnosticSink::new();
    for err in validate_all(&design) {
        sink.emit(codes::error_invalid_design(&err));
    }

    let summary = report(&sink.take_all(), args.format, global);
    if !global.quiet {
        eprintln!(
            "   Checked {}: {} scope(s), {} error(s)",
            args.design.display(),
            design.scope_count(),
            summary.errors
        );
    }

    Ok(if summary.errors > 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportFormat;
    use tempfile::TempDir;
    use tessel_common::Interner;
    use tessel_netlist::{save_design, DesignBuilder, ScopeKind};

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
        }
    }

    fn check(dir: &TempDir, empty_nexuses: usize) -> i32 {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "top", ScopeKind::Module);
        b.signal(top, "x", 4);
        for _ in 0..empty_nexuses {
            b.nexus();
        }
        let path = dir.path().join("design.json");
        save_design(&path, &b.finish(), &interner).unwrap();
        let args = CheckArgs {
            design: path,
            format: ReportFormat::Json,
        };
        run(&args, &quiet()).unwrap()
    }

    #[test]
    fn valid_design_passes() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(check(&tmp, 0), 0);
    }

    #[test]
    fn violations_exit_with_one() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(check(&tmp, 2), 1);
    }

    #[test]
    fn unparseable_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("design.json");
        std::fs::write(&path, "{ not json").unwrap();
        let args = CheckArgs {
            design: path,
            format: ReportFormat::Text,
        };
        assert!(run(&args, &quiet()).is_err());
    }
}
