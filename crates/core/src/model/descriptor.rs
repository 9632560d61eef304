//! Serializable summaries of models, for diagnostics and tooling

use serde::{Deserialize, Serialize};

use super::TypeModel;
use crate::property::PropertyInfo;

/// Summary of one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub value_type: String,
    pub readable: bool,
    pub writable: bool,
    /// Debug rendering of each attribute, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
}

impl PropertyDescriptor {
    fn from_property(property: &dyn PropertyInfo) -> Self {
        Self {
            name: property.name().to_string(),
            value_type: property.value_type().name().to_string(),
            readable: property.has_getter(),
            writable: property.has_setter(),
            attributes: property
                .attributes()
                .iter()
                .map(|a| format!("{:?}", a))
                .collect(),
        }
    }
}

/// Summary of a whole model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub type_name: String,
    pub properties: Vec<PropertyDescriptor>,
}

impl ModelDescriptor {
    pub(crate) fn from_model(model: &TypeModel) -> Self {
        Self {
            type_name: model.subject().name().to_string(),
            properties: model
                .properties()
                .iter()
                .map(|p| PropertyDescriptor::from_property(p.as_ref()))
                .collect(),
        }
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
