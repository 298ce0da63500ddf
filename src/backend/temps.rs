//! Temporaries hoisted out of expressions, and the statements that materialize them.

use infragen_core::lang::runtime::JSON_MARSHAL;
use infragen_model::{Expression, Type};

use super::expressions::{ExprPrinter, PrintError};
use super::go_emitter::{GoEmitter, go_type_name};

/// A spilled conditional: `var tmpN T; if c { tmpN = t } else { tmpN = f }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalTemp {
    pub name: String,
    pub condition: Expression,
    pub true_result: Expression,
    pub false_result: Expression,
    pub ty: Type,
}

/// A spilled JSON encoding: `tmpJSONN, err := json.Marshal(v)`, the error check, then `jsonN := string(tmpJSONN)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializationTemp {
    pub name: String,
    pub bytes_name: String,
    /// Argument to encode, with input wrapping already stripped.
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TempDescriptor {
    Conditional(ConditionalTemp),
    Serialization(SerializationTemp),
}

impl TempDescriptor {
    pub fn name(&self) -> &str {
        match self {
            TempDescriptor::Conditional(temp) => &temp.name,
            TempDescriptor::Serialization(temp) => &temp.name,
        }
    }
}

/// Emit the statements for `temps`, in order.
pub fn emit_temps(emitter: &mut GoEmitter, printer: &ExprPrinter<'_>, temps: &[TempDescriptor]) -> Result<(), PrintError> {
    for temp in temps {
        tracing::debug!(temp = temp.name(), "emitting temporary");
        match temp {
            TempDescriptor::Conditional(temp) => {
                emitter.line(&format!("var {} {}", temp.name, go_type_name(&temp.ty)));
                let condition = printer.render(&temp.condition)?;
                let true_result = printer.render(&temp.true_result)?;
                let false_result = printer.render(&temp.false_result)?;
                emitter.line(&format!("if {condition} {{"));
                emitter.indented(|e| e.line(&format!("{} = {true_result}", temp.name)));
                emitter.line("} else {");
                emitter.indented(|e| e.line(&format!("{} = {false_result}", temp.name)));
                emitter.line("}");
            }
            TempDescriptor::Serialization(temp) => {
                let value = printer.render(&temp.value)?;
                emitter.line(&format!("{}, err := {JSON_MARSHAL}({value})", temp.bytes_name));
                emitter.if_err_return();
                emitter.line(&format!("{} := string({})", temp.name, temp.bytes_name));
            }
        }
    }
    Ok(())
}
