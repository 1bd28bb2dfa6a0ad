//! One-line value summaries shown beside tree entries.

use crate::error::ConfigResult;
use crate::model::{Value, ValueType, Variable, WidgetHint};
use crate::types::Colour;

/// Text shown next to a leaf in the navigator.
///
/// Actions show nothing. Colour-hinted ints show their components, or `???`
/// when the value is not an int.
pub fn summary(variable: &Variable) -> ConfigResult<String> {
    if variable.is_action() {
        return Ok(String::new());
    }

    let value = variable.get()?;
    if variable.value_type() == ValueType::Int && variable.widget_hint() == Some(WidgetHint::Colour) {
        return Ok(match value {
            Value::Int(v) => Colour(v as u32).to_string(),
            _ => "???".to_string(),
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::stored;

    #[test]
    fn test_plain_values() {
        let (variable, _) = stored("n", ValueType::Int, Value::Int(42));
        assert_eq!(summary(&variable).unwrap(), "42");

        let (variable, _) = stored("s", ValueType::Chars, Value::Chars(vec!['h', 'i']));
        assert_eq!(summary(&variable).unwrap(), "hi");

        let (variable, _) = stored("b", ValueType::Bool, Value::Bool(true));
        assert_eq!(summary(&variable).unwrap(), "true");
    }

    #[test]
    fn test_colour_summary() {
        let (variable, _) = stored("c", ValueType::Int, Value::Int(Colour::RED.0 as i32));
        let variable = variable.with_hint(Some(WidgetHint::Colour));
        assert_eq!(summary(&variable).unwrap(), "255:000:000:255");

        let (variable, _) = stored("c", ValueType::Int, Value::Str("x".into()));
        let variable = variable.with_hint(Some(WidgetHint::Colour));
        assert_eq!(summary(&variable).unwrap(), "???");
    }

    #[test]
    fn test_action_is_blank() {
        let variable = Variable::action("go", || Ok(()));
        assert_eq!(summary(&variable).unwrap(), "");
    }
}
