//! `tessel generate`: design file to VHDL.
//!
//! 1. Load the design file and its name table
//! 2. Load `tessel.toml` (explicit path, or next to the design)
//! 3. Validate and generate
//! 4. Write the VHDL and render diagnostics

use std::path::Path;

use tessel_config::{load_config, load_optional_config, TesselConfig};
use tessel_diagnostics::DiagnosticSink;
use tessel_netlist::load_design;

use crate::report::report;
use crate::{GenerateArgs, GlobalArgs};

/// Runs the `tessel generate` command.
///
/// Returns exit code 0 if no errors were reported, 1 otherwise. Fatal
/// problems (unreadable input, invalid design, bad configuration) are
/// returned as errors.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (design, interner) = load_design(&args.design)?;
    let mut config = resolve_config(args)?;
    if args.parallel {
        config.codegen.parallel = true;
    }

    if !global.quiet {
        eprintln!(
            "   Generating {} ({} scopes)",
            args.design.display(),
            design.scope_count()
        );
    }

    let sink = DiagnosticSink::new();
    let generated = match tessel_vhdl::generate(&design, &interner, &config, &sink) {
        Ok(generated) => generated,
        Err(err) => {
            report(&sink.take_all(), args.format, global);
            return Err(err.into());
        }
    };

    match &args.output {
        Some(path) => std::fs::write(path, &generated.text)?,
        None => print!("{}", generated.text),
    }

    let summary = report(&sink.take_all(), args.format, global);
    if !global.quiet {
        eprintln!(
            "   Result: {} unit(s), {} error(s), {} warning(s), hash {}",
            generated.units, summary.errors, summary.warnings, generated.hash.short()
        );
    }

    Ok(if generated.failed() { 1 } else { 0 })
}

fn resolve_config(args: &GenerateArgs) -> Result<TesselConfig, tessel_config::ConfigError> {
    match &args.config {
        Some(path) => load_config(path),
        None => {
            let dir = args
                .design
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            load_optional_config(dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportFormat;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tessel_common::Interner;
    use tessel_netlist::{
        save_design, ArithOp, DesignBuilder, FlipFlop, LpmKind, PortDirection, ScopeKind,
    };

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
        }
    }

    fn args(design: PathBuf, output: PathBuf) -> GenerateArgs {
        GenerateArgs {
            design,
            output: Some(output),
            config: None,
            parallel: false,
            format: ReportFormat::Text,
        }
    }

    /// Writes an adder design, optionally with an unsupported flip-flop.
    fn write_adder(dir: &Path, with_ff: bool) -> PathBuf {
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        let top = b.root_scope("top", "adder", ScopeKind::Module);
        let a = b.port(top, "a", 8, PortDirection::Input);
        let c = b.port(top, "b", 8, PortDirection::Input);
        let (na, nb) = (b.signal_nexus(a), b.signal_nexus(c));
        let q = b.nexus();
        b.lpm(
            top,
            "add0",
            LpmKind::Arith {
                op: ArithOp::Add,
                width: 8,
                signed: false,
                q,
                a: na,
                b: nb,
            },
        );
        if with_ff {
            let ff_q = b.nexus();
            b.lpm(
                top,
                "ff0",
                LpmKind::FlipFlop(FlipFlop {
                    width: 8,
                    q: ff_q,
                    data: na,
                    clock: nb,
                    enable: None,
                    async_clear: None,
                    async_set: None,
                    sync_clear: None,
                    sync_set: None,
                    async_set_value: None,
                    sync_set_value: None,
                }),
            );
        }
        let path = dir.join("adder.json");
        save_design(&path, &b.finish(), &interner).unwrap();
        path
    }

    #[test]
    fn writes_vhdl_file() {
        let tmp = TempDir::new().unwrap();
        let design = write_adder(tmp.path(), false);
        let out = tmp.path().join("adder.vhd");
        let code = run(&args(design, out.clone()), &quiet()).unwrap();
        assert_eq!(code, 0);
        let text = std::fs::read_to_string(out).unwrap();
        assert!(text.contains("LPMadd0_Out <= a + b;"));
    }

    #[test]
    fn lowering_errors_exit_with_one() {
        let tmp = TempDir::new().unwrap();
        let design = write_adder(tmp.path(), true);
        let out = tmp.path().join("adder.vhd");
        let code = run(&args(design, out.clone()), &quiet()).unwrap();
        assert_eq!(code, 1);
        assert!(std::fs::read_to_string(out).unwrap().contains("a + b"));
    }

    #[test]
    fn config_next_to_design_is_used() {
        let tmp = TempDir::new().unwrap();
        let design = write_adder(tmp.path(), false);
        std::fs::write(
            tmp.path().join("tessel.toml"),
            "[naming]\nlpm_prefix = \"Dev\"\n",
        )
        .unwrap();
        let out = tmp.path().join("adder.vhd");
        run(&args(design, out.clone()), &quiet()).unwrap();
        assert!(std::fs::read_to_string(out).unwrap().contains("Devadd0_Out <= a + b;"));
    }

    #[test]
    fn bad_config_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let design = write_adder(tmp.path(), false);
        let cfg = tmp.path().join("custom.toml");
        std::fs::write(&cfg, "[naming]\nlpm_prefix = \"1x\"\n").unwrap();
        let mut a = args(design, tmp.path().join("adder.vhd"));
        a.config = Some(cfg);
        assert!(run(&a, &quiet()).is_err());
    }

    #[test]
    fn missing_design_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let a = args(tmp.path().join("nope.json"), tmp.path().join("x.vhd"));
        assert!(run(&a, &quiet()).is_err());
    }

    #[test]
    fn invalid_design_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        let interner = Interner::new();
        let mut b = DesignBuilder::new(&interner);
        b.root_scope("top", "top", ScopeKind::Module);
        b.nexus();
        save_design(&path, &b.finish(), &interner).unwrap();
        let a = args(path, tmp.path().join("x.vhd"));
        let err = run(&a, &quiet()).unwrap_err();
        assert!(err.to_string().starts_with("invalid design"));
        assert!(!tmp.path().join("x.vhd").exists());
    }
}
