//! Serde data model for `form-data.json` files.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{FormError, FormResult};

/// A parsed `form-data.json` file.
#[derive(Debug, Deserialize)]
pub struct FormDocument {
    /// Mapping from form path to form definition.
    pub form: HashMap<String, FormDefinition>,
}

/// One entry in a file's `"form"` mapping.
///
/// `fieldsets` and `formData` are opaque to this crate and handed to the
/// rendering template untouched. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    /// Rendering template for this form; the final extension is stripped
    /// before use.
    pub template_path: String,

    /// Ordered field groups rendered together.
    #[serde(default)]
    pub fieldsets: Vec<Value>,

    /// Default field values.
    #[serde(default)]
    pub form_data: Map<String, Value>,

    /// Render the form inside a modal.
    pub is_modal: Option<bool>,

    /// DOM id for the modal wrapper.
    pub modal_id: Option<String>,

    /// Paths that reuse this form's field definitions.
    pub children_paths: Option<Vec<String>>,
}

impl FormDocument {
    /// Read and parse a `form-data.json` file.
    ///
    /// The top-level `"form"` key is checked before the records are
    /// deserialized, so a missing key surfaces as a configuration error
    /// rather than a generic parse failure.
    pub fn load(path: &Path) -> FormResult<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|source| FormError::from_io(path, source))?;

        let value: Value = serde_json::from_str(&text).map_err(|source| FormError::InvalidJson {
            file: path.to_path_buf(),
            source,
        })?;

        let forms = match value {
            Value::Object(mut doc) => match doc.remove("form") {
                Some(forms) => forms,
                None => {
                    return Err(FormError::MissingFormKey {
                        file: path.to_path_buf(),
                    });
                }
            },
            _ => {
                return Err(FormError::MissingFormKey {
                    file: path.to_path_buf(),
                });
            }
        };

        let form = serde_json::from_value(forms).map_err(|source| FormError::InvalidJson {
            file: path.to_path_buf(),
            source,
        })?;

        Ok(Self { form })
    }
}
