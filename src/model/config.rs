//! The tree node contract.

use std::fmt;
use std::rc::Rc;

use super::variable::Variable;
use crate::error::ConfigResult;

/// One node of a settings tree.
///
/// Composites return `Some` from [`Config::children`]; leaves return `None`.
pub trait Config {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Whether the node is shown. Evaluated on every call.
    fn enabled(&self) -> ConfigResult<bool>;

    /// Whether accepting an edit moves the selection on to the next sibling.
    fn wizard(&self) -> bool {
        false
    }

    /// Ordered, enabled children, or `None` for a leaf.
    fn children(&self) -> ConfigResult<Option<Vec<Node>>>;

    /// Render the structure as indented text, composites suffixed with `/`.
    fn tree(&self, indent: &str) -> ConfigResult<String> {
        let mut out = format!("{indent}{}", self.name());
        if let Some(children) = self.children()? {
            out.push('/');
            let deeper = format!("{indent}  ");
            for child in children {
                out.push('\n');
                out.push_str(&child.as_config().tree(&deeper)?);
            }
        }
        Ok(out)
    }
}

/// A child node: either a composite or a leaf.
#[derive(Clone)]
pub enum Node {
    Composite(Rc<dyn Config>),
    Leaf(Variable),
}

impl Node {
    pub fn as_config(&self) -> &dyn Config {
        match self {
            Self::Composite(c) => c.as_ref(),
            Self::Leaf(v) => v,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.as_config().name()
    }

    #[inline]
    pub fn description(&self) -> &str {
        self.as_config().description()
    }

    pub fn enabled(&self) -> ConfigResult<bool> {
        self.as_config().enabled()
    }

    pub fn wizard(&self) -> bool {
        self.as_config().wizard()
    }

    pub fn children(&self) -> ConfigResult<Option<Vec<Node>>> {
        self.as_config().children()
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Leaf(v) => Some(v),
            Self::Composite(_) => None,
        }
    }
}

impl From<Variable> for Node {
    fn from(value: Variable) -> Self {
        Self::Leaf(value)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite(c) => f.debug_tuple("Composite").field(&c.name()).finish(),
            Self::Leaf(v) => f.debug_tuple("Leaf").field(v).finish(),
        }
    }
}
