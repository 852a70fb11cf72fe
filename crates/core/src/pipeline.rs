//! End-to-end run: load -> parse -> convert -> render -> emit.
//!
//! ```text
//! Start -> Loaded -> Parsed -> Converted -> {ModelEmitted}* -> OperationsEmitted -> Done
//! ```
//!
//! Any failure ends the run immediately. Files written before the failure
//! stay on disk; nothing after it is attempted.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::convert::{ConverterFactory, ConverterRegistry};
use crate::emit::FileEmitter;
use crate::error::Result;
use crate::loader::{Locator, load_document};
use crate::options::Options;
use crate::render::{ModelFileView, OperationsFileView, TemplateKind, TemplateRenderer};
use crate::swagger::parse_document;

/// States of a generation run, ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Options validated, converter not yet resolved.
    Start,
    /// Document text fetched.
    Loaded,
    /// Declaration parsed.
    Parsed,
    /// Descriptors built.
    Converted,
    /// The model at this index was written.
    ModelEmitted(usize),
    /// The operations file was written.
    OperationsEmitted,
    /// Run finished.
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Start => f.write_str("start"),
            Stage::Loaded => f.write_str("loaded"),
            Stage::Parsed => f.write_str("parsed"),
            Stage::Converted => f.write_str("converted"),
            Stage::ModelEmitted(index) => write!(f, "model-emitted[{index}]"),
            Stage::OperationsEmitted => f.write_str("operations-emitted"),
            Stage::Done => f.write_str("done"),
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Paths written, in emission order. In single-file mode the same path
    /// repeats once per appended block.
    pub files: Vec<PathBuf>,
    /// Number of models converted.
    pub models: usize,
    /// Number of operation groups converted.
    pub apis: usize,
    /// Unknown or missing members reported while parsing.
    pub warnings: usize,
}

fn enter(stage: Stage) {
    debug!(%stage, "Entering stage.");
}

/// Run the whole pipeline for one document.
///
/// The converter key is resolved before anything is read, so an unknown
/// key fails without touching the network or the output folder.
pub async fn generate(options: &Options, registry: &ConverterRegistry) -> Result<RunReport> {
    enter(Stage::Start);
    let factory = registry.resolve(&options.converter)?;

    let credentials = options.credentials();
    let text = load_document(&options.input, credentials.as_ref()).await?;
    enter(Stage::Loaded);

    generate_from_text(options, factory, &text)
}

/// Run everything after loading against already-fetched document text.
pub fn generate_from_text(
    options: &Options,
    factory: ConverterFactory,
    text: &str,
) -> Result<RunReport> {
    let parsed = parse_document(text)?;
    enter(Stage::Parsed);

    let mut converter = factory(parsed.declaration);
    converter.register_safe_types();
    let extension = converter.default_extension();
    let models = converter.models();
    let apis = converter.apis();
    enter(Stage::Converted);

    let renderer = TemplateRenderer::from_options(options);
    let emitter = FileEmitter::from_options(options);
    let mut report = RunReport {
        models: models.len(),
        apis: apis.len(),
        warnings: parsed.warnings.len(),
        ..RunReport::default()
    };

    for (index, data_type) in models.iter().enumerate() {
        let view = ModelFileView {
            resourceurl: &options.input,
            namespace: &options.namespace,
            data_type,
        };
        let rendered = renderer.render(TemplateKind::Model, &view)?;
        report
            .files
            .push(emitter.emit(&rendered, &data_type.file_name, extension)?);
        enter(Stage::ModelEmitted(index));
    }

    let name = Locator::parse(&options.input).base_name();
    let view = OperationsFileView {
        resourceurl: &options.input,
        namespace: &options.namespace,
        name: &name,
        apis: &apis,
    };
    let rendered = renderer.render(TemplateKind::Action, &view)?;
    report.files.push(emitter.emit(&rendered, &name, extension)?);
    enter(Stage::OperationsEmitted);

    enter(Stage::Done);
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use std::fs;

    const PETS_JSON: &str = r#"{
        "apis": [{ "path": "/pets", "operations": [{ "method": "GET", "nickname": "listPets", "type": "array", "items": { "$ref": "Pet" } }] }],
        "models": {
            "Pet": { "properties": { "name": { "type": "string" } } },
            "Tag": { "properties": { "label": { "type": "string" } } }
        }
    }"#;

    fn setup(templates: &[(&str, &str)]) -> (tempfile::TempDir, Options) {
        let dir = tempfile::tempdir().unwrap();
        let template_dir = dir.path().join("Templates");
        fs::create_dir_all(&template_dir).unwrap();
        for (name, body) in templates {
            fs::write(template_dir.join(name), body).unwrap();
        }
        let mut options = Options::new("pets.json", "MyNs", dir.path().join("out"));
        options.template_dir = template_dir;
        (dir, options)
    }

    fn csharp() -> ConverterFactory {
        ConverterRegistry::builtin().resolve("c#").unwrap()
    }

    #[test]
    fn test_emits_one_file_per_model_plus_operations() {
        let (_dir, options) = setup(&[
            ("ModelTemplate.txt", "model {{ Model.DataType.Name }}\n"),
            ("ActionTemplate.txt", "ops {{ Model.Name }}\n"),
        ]);

        let report = generate_from_text(&options, csharp(), PETS_JSON).unwrap();
        let out = &options.output_folder;
        assert_eq!(
            report.files,
            [out.join("Pet.cs"), out.join("Tag.cs"), out.join("pets.cs")]
        );
        assert_eq!(report.models, 2);
        assert_eq!(report.apis, 1);
        assert_eq!(fs::read_to_string(out.join("Tag.cs")).unwrap(), "model Tag\n");
        assert_eq!(fs::read_to_string(out.join("pets.cs")).unwrap(), "ops pets\n");
    }

    #[test]
    fn test_single_file_mode_appends_models_then_operations() {
        let (_dir, mut options) = setup(&[
            ("ModelTemplate.txt", "[{{ Model.DataType.Name }}]"),
            ("ActionTemplate.txt", "[ops]"),
        ]);
        options.single_file_name = Some("All.cs".into());

        let report = generate_from_text(&options, csharp(), PETS_JSON).unwrap();
        assert_eq!(report.files.len(), 3);
        let combined = fs::read_to_string(options.output_folder.join("All.cs")).unwrap();
        assert_eq!(combined, "[Pet][Tag][ops]");
    }

    #[test]
    fn test_missing_action_template_keeps_written_models() {
        let (_dir, options) = setup(&[("ModelTemplate.txt", "model")]);

        let err = generate_from_text(&options, csharp(), PETS_JSON).unwrap_err();
        assert!(matches!(err, GenError::TemplateMissing { .. }), "{err}");
        assert!(options.output_folder.join("Pet.cs").exists());
        assert!(options.output_folder.join("Tag.cs").exists());
        assert!(!options.output_folder.join("pets.cs").exists());
    }

    #[test]
    fn test_render_failure_stops_remaining_models() {
        let (_dir, options) = setup(&[
            (
                "ModelTemplate.txt",
                "{% if Model.DataType.Name == \"Tag\" %}{{ Model.Nope.Nope }}{% endif %}ok",
            ),
            ("ActionTemplate.txt", "ops"),
        ]);
        let json = r#"{
            "apis": [{ "path": "/pets", "operations": [] }],
            "models": { "Pet": {}, "Tag": {}, "Toy": {} }
        }"#;

        let err = generate_from_text(&options, csharp(), json).unwrap_err();
        assert!(matches!(err, GenError::Render { .. }), "{err}");
        assert!(options.output_folder.join("Pet.cs").exists());
        assert!(!options.output_folder.join("Tag.cs").exists());
        assert!(!options.output_folder.join("Toy.cs").exists());
        assert!(!options.output_folder.join("pets.cs").exists());
    }

    #[test]
    fn test_not_swagger_writes_nothing() {
        let (_dir, options) = setup(&[
            ("ModelTemplate.txt", "model"),
            ("ActionTemplate.txt", "ops"),
        ]);

        let err = generate_from_text(&options, csharp(), r#"{"foo":"bar"}"#).unwrap_err();
        assert!(matches!(err, GenError::NotSwagger), "{err}");
        assert!(!options.output_folder.exists());
    }

    #[test]
    fn test_colliding_model_names_write_separate_files() {
        let (_dir, options) = setup(&[
            ("ModelTemplate.txt", "{{ Model.DataType.OriginalName }}"),
            ("ActionTemplate.txt", "ops"),
        ]);
        let json = r#"{
            "apis": [{ "path": "/pets", "operations": [] }],
            "models": { "pet-item": {}, "pet_item": {} }
        }"#;

        let report = generate_from_text(&options, csharp(), json).unwrap();
        let out = &options.output_folder;
        assert_eq!(
            report.files,
            [out.join("pet_item.cs"), out.join("pet_item1.cs"), out.join("pets.cs")]
        );
        assert_eq!(fs::read_to_string(out.join("pet_item.cs")).unwrap(), "pet-item");
        assert_eq!(fs::read_to_string(out.join("pet_item1.cs")).unwrap(), "pet_item");
    }

    #[test]
    fn test_missing_members_still_generate() {
        let (_dir, options) = setup(&[
            ("ModelTemplate.txt", "model"),
            ("ActionTemplate.txt", "{% for api in Model.Apis %}[{{ api.Path }}]{% endfor %}"),
        ]);
        let json = r#"{ "apis": [{ "operations": [{ "nickname": "listPets" }] }], "models": null }"#;

        let report = generate_from_text(&options, csharp(), json).unwrap();
        assert_eq!(report.warnings, 2);
        assert_eq!(report.files, [options.output_folder.join("pets.cs")]);
        assert_eq!(
            fs::read_to_string(options.output_folder.join("pets.cs")).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::ModelEmitted(2).to_string(), "model-emitted[2]");
        assert_eq!(Stage::OperationsEmitted.to_string(), "operations-emitted");
    }
}
