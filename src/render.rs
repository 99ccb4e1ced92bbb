//! Form rendering through Tera.

use std::collections::HashMap;
use std::sync::Arc;

use tera::{Context, Tera};

use crate::config::Settings;
use crate::error::{FormError, FormResult};
use crate::index::FormIndex;
use crate::schema::FormDocument;

/// Renders indexed forms through a Tera engine.
///
/// The index only remembers where each form lives; the backing JSON file is
/// re-read on every render so edits show up without a rescan.
pub struct FormRenderer {
    index: Arc<FormIndex>,
    tera: Tera,
    template_suffix: String,
}

impl FormRenderer {
    /// Build a renderer over the configured template root, loading every
    /// `*.html` template below it.
    pub fn new(settings: &Settings, index: Arc<FormIndex>) -> FormResult<Self> {
        let glob = format!("{}/**/*.html", settings.templates_dir.display());
        let tera = Tera::new(&glob).map_err(|source| FormError::TemplateLoad { glob, source })?;
        Ok(Self {
            index,
            tera,
            template_suffix: settings.template_suffix.clone(),
        })
    }

    /// The metadata index this renderer serves from.
    pub fn index(&self) -> &FormIndex {
        &self.index
    }

    /// Render the form registered at `form_path`.
    ///
    /// A child path resolves its field definitions through its parent's
    /// record, while the child's own path is handed to the template as
    /// `path`. Non-child renders receive `path = null`.
    pub fn load_form(&self, form_path: &str) -> FormResult<String> {
        let metadata = self
            .index
            .get(form_path)
            .ok_or_else(|| FormError::MetadataNotFound(form_path.to_string()))?;

        let doc = FormDocument::load(&metadata.file_path)?;

        let lookup = metadata.parent_path.as_deref().unwrap_or(form_path);
        let form = doc
            .form
            .get(lookup)
            .ok_or_else(|| FormError::FormDataNotFound(form_path.to_string()))?;

        let display_path = metadata.is_child.then_some(form_path);

        let mut context = Context::new();
        context.insert("fieldsets", &form.fieldsets);
        context.insert("formData", &form.form_data);
        context.insert("isModal", &form.is_modal);
        context.insert("modalId", &form.modal_id);
        context.insert("path", &display_path);

        let template = format!("{}{}", metadata.template, self.template_suffix);
        self.tera
            .render(&template, &context)
            .map_err(|source| match source.kind {
                tera::ErrorKind::TemplateNotFound(_) => FormError::TemplateNotFound {
                    template: metadata.template.clone(),
                },
                _ => FormError::Render { template, source },
            })
    }
}

/// Install the renderer as a `load_form` template function.
///
/// Templates rendered by `tera` can then inline a form:
///
/// ```text
/// {{ load_form(path="/contact-us") | safe }}
/// ```
///
/// The renderer keeps its own engine instance, so `load_form` is not
/// visible from inside the form templates themselves and cannot recurse.
pub fn register_template_function(tera: &mut Tera, renderer: Arc<FormRenderer>) {
    tera.register_function(
        "load_form",
        move |args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
            let path = args
                .get("path")
                .and_then(tera::Value::as_str)
                .ok_or_else(|| tera::Error::msg("load_form requires a string `path` argument"))?;

            let html = renderer
                .load_form(path)
                .map_err(|e| tera::Error::msg(e.to_string()))?;
            Ok(tera::Value::String(html))
        },
    );
}
