//! Rendering of the VHDL syntax tree as text.

use crate::ast::{
    Architecture, Assign, Decl, Entity, Expr, ExprKind, Port, PortMode, Slice, UnOp, Unit,
    VhdlType,
};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

impl fmt::Display for VhdlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VhdlType::StdLogic => f.write_str("std_logic"),
            VhdlType::Unsigned(w) => write!(f, "unsigned({} downto 0)", w.saturating_sub(1)),
            VhdlType::Signed(w) => write!(f, "signed({} downto 0)", w.saturating_sub(1)),
            VhdlType::Integer => f.write_str("integer"),
            VhdlType::Boolean => f.write_str("boolean"),
            VhdlType::Real => f.write_str("real"),
            VhdlType::Named(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self, false)
    }
}

/// Writes an expression. Operator expressions nested inside another
/// operator are parenthesized.
fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, nested: bool) -> fmt::Result {
    match &expr.kind {
        ExprKind::Ref { name, slice } => {
            f.write_str(name)?;
            match slice {
                None => Ok(()),
                Some(Slice::Index(index)) => write!(f, "({index})"),
                Some(Slice::Range { low, span }) => match low.kind {
                    ExprKind::Int(low) => write!(f, "({} downto {low})", low + i64::from(*span)),
                    _ => {
                        f.write_char('(')?;
                        write_expr(f, low, true)?;
                        write!(f, " + {span} downto {low})")
                    }
                },
            }
        }
        ExprKind::Int(value) => write!(f, "{value}"),
        ExprKind::Bits(bits) => {
            f.write_char('"')?;
            for bit in bits.iter().rev() {
                f.write_char(bit.to_std_logic())?;
            }
            f.write_char('"')
        }
        ExprKind::Char(bit) => write!(f, "'{}'", bit.to_std_logic()),
        ExprKind::Real(value) => write!(f, "{value:?}"),
        ExprKind::Binary { op, operands } => {
            if nested {
                f.write_char('(')?;
            }
            for (i, operand) in operands.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", op.symbol())?;
                }
                write_expr(f, operand, true)?;
            }
            if nested {
                f.write_char(')')?;
            }
            Ok(())
        }
        ExprKind::Unary { op, operand } => {
            if nested {
                f.write_char('(')?;
            }
            match op {
                UnOp::Not => f.write_str("not ")?,
                UnOp::Neg => f.write_char('-')?,
            }
            write_expr(f, operand, true)?;
            if nested {
                f.write_char(')')?;
            }
            Ok(())
        }
        ExprKind::Call { name, args } => {
            write!(f, "{name}(")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_expr(f, arg, false)?;
            }
            f.write_char(')')
        }
        ExprKind::BitSpec(bit) => write!(f, "(0 => {bit}, others => '0')"),
        ExprKind::Cond {
            branches,
            otherwise,
        } => {
            for (cond, value) in branches {
                write_expr(f, value, true)?;
                f.write_str(" when ")?;
                write_expr(f, cond, false)?;
                f.write_str(" else ")?;
            }
            write_expr(f, otherwise, true)
        }
    }
}

impl fmt::Display for PortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PortMode::In => "in",
            PortMode::Out => "out",
            PortMode::InOut => "inout",
        })
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} {}", self.name, self.mode, self.ty)
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decl::Signal { name, ty } => write!(f, "signal {name} : {ty};"),
            Decl::Constant { name, ty, value } => write!(f, "constant {name} : {ty} := {value};"),
            Decl::ArrayType {
                name,
                low,
                high,
                element,
            } => write!(f, "type {name} is array ({low} to {high}) of {element};"),
        }
    }
}

impl fmt::Display for Assign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <= {};", self.target, self.value)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "entity {} is", self.name)?;
        if !self.ports.is_empty() {
            writeln!(f, "{INDENT}port (")?;
            for (i, port) in self.ports.iter().enumerate() {
                let sep = if i + 1 < self.ports.len() { ";" } else { "" };
                writeln!(f, "{INDENT}{INDENT}{port}{sep}")?;
            }
            writeln!(f, "{INDENT});")?;
        }
        writeln!(f, "end entity;")
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "architecture {} of {} is", self.name, self.entity)?;
        for decl in &self.decls {
            writeln!(f, "{INDENT}{decl}")?;
        }
        writeln!(f, "begin")?;
        for stmt in &self.stmts {
            writeln!(f, "{INDENT}{stmt}")?;
        }
        writeln!(f, "end architecture;")
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut libraries: Vec<&str> = Vec::new();
        for clause in &self.uses {
            let lib = clause.split('.').next().unwrap_or(clause);
            if !matches!(lib, "work" | "std") && !libraries.contains(&lib) {
                libraries.push(lib);
            }
        }
        for lib in libraries {
            writeln!(f, "library {lib};")?;
        }
        for clause in &self.uses {
            writeln!(f, "use {clause};")?;
        }
        writeln!(f)?;
        if let Some(comment) = &self.comment {
            writeln!(f, "-- {comment}")?;
        }
        write!(f, "{}", self.entity)?;
        writeln!(f)?;
        write!(f, "{}", self.architecture)
    }
}
