//! Component generation.
//!
//! Features are processed one at a time and each is committed on its own:
//! a failing feature stops the run but leaves earlier components in place.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use aisp_agents::{AispRawRow, ComponentRow, ComponentStore};
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::idea::{crud_entity, IdeaSheet};
use crate::schema::SpecValidator;
use crate::template::Template;
use crate::GeneratorError;

/// Prefix of every CRUD component identifier.
pub const CRUD_ID_PREFIX: &str = "API-CRUD";

/// Field of the rendered specification holding the raw instruction.
pub const AISP_FIELD: &str = "aisp";

/// `API-CRUD-<ENTITY>-<XXXX>` with a random 4-digit uppercase hex suffix.
///
/// Suffix collisions are possible and not checked.
pub fn new_component_id(entity: &str) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(4).collect();
    format!(
        "{}-{}-{}",
        CRUD_ID_PREFIX,
        entity.to_uppercase(),
        suffix.to_uppercase()
    )
}

/// A component written to disk and to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedComponent {
    pub component_id: String,
    pub entity: String,
    pub spec_path: PathBuf,
    pub spec: Value,
}

pub struct Generator<'a> {
    store: &'a dyn ComponentStore,
    template: Template,
    validator: SpecValidator,
    out_dir: PathBuf,
}

impl<'a> Generator<'a> {
    /// Create a generator writing specifications under `out_dir`, which is
    /// created if missing.
    pub fn new(
        store: &'a dyn ComponentStore,
        template: Template,
        validator: SpecValidator,
        out_dir: impl Into<PathBuf>,
    ) -> Result<Self, GeneratorError> {
        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir).map_err(|e| GeneratorError::io(&out_dir, e))?;

        Ok(Self {
            store,
            template,
            validator,
            out_dir,
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Generate the component for one feature.
    ///
    /// Returns `Ok(None)` for features without the CRUD marker. Nothing is
    /// written unless the rendered specification passes the schema.
    #[instrument(skip(self))]
    pub async fn generate_feature(
        &self,
        feature: &str,
    ) -> Result<Option<GeneratedComponent>, GeneratorError> {
        let Some(entity) = crud_entity(feature) else {
            debug!("Skipping non-CRUD feature");
            return Ok(None);
        };

        let component_id = new_component_id(entity);
        let context = BTreeMap::from([
            ("entity", entity.to_string()),
            ("component_id", component_id.clone()),
        ]);

        let spec = self.template.render(&context)?;
        self.validator.validate(&spec)?;

        let aisp = spec
            .get(AISP_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| GeneratorError::MissingAisp {
                component_id: component_id.clone(),
            })?
            .to_string();

        let spec_path = self.write_spec(&component_id, &spec)?;

        self.store
            .upsert_component(&ComponentRow::ready(component_id.clone(), spec.clone()))
            .await?;
        self.store
            .upsert_aisp_raw(&AispRawRow {
                component_id: component_id.clone(),
                aisp,
            })
            .await?;

        info!(component_id = %component_id, path = %spec_path.display(), "Component generated");

        Ok(Some(GeneratedComponent {
            component_id,
            entity: entity.to_string(),
            spec_path,
            spec,
        }))
    }

    /// Generate every CRUD feature of an idea sheet in order, reporting each
    /// component as soon as it is committed.
    pub async fn run(
        &self,
        idea: &IdeaSheet,
        mut on_generated: impl FnMut(&GeneratedComponent),
    ) -> Result<Vec<GeneratedComponent>, GeneratorError> {
        let mut generated = Vec::new();

        for feature in &idea.features {
            if let Some(component) = self.generate_feature(feature).await? {
                on_generated(&component);
                generated.push(component);
            }
        }

        Ok(generated)
    }

    fn write_spec(&self, component_id: &str, spec: &Value) -> Result<PathBuf, GeneratorError> {
        let path = self.out_dir.join(format!("{}.json", component_id));
        let text = serde_json::to_string_pretty(spec)?;
        std::fs::write(&path, text).map_err(|e| GeneratorError::io(&path, e))?;
        Ok(path)
    }
}
