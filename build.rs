use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use phf_codegen::Map;
use regex::Regex;
use std::collections::{HashMap, HashSet};

include!("src/models/selection.rs");

const RESOURCES_FILE_NAME: &str = "compiled.gresources";
const UI_XML: &str = include_str!("resources/ui.xml");
const CATALOG_TOML: &str = include_str!("resources/catalog.toml");
const MANIFEST_TOML: &str = include_str!("Cargo.toml");
const RESOURCES_XML: &str = include_str!("resources/resources.gresource.xml.in");

// ===== TRAITS =====

trait StringExtensions {
    fn replace_exactly(&self, from: &str, to: &str, count: usize) -> Result<String>;
}

impl<T> StringExtensions for T
where
    T: AsRef<str>,
{
    fn replace_exactly(&self, from: &str, to: &str, count: usize) -> Result<String> {
        let text = self.as_ref();
        let parts: Vec<&str> = text.split(from).collect();
        let actual_count = parts.len() - 1;

        if actual_count != count {
            bail!(
                "Expected to replace exactly {count} occurrence(s) of '{from}' with '{to}', but found {actual_count}."
            );
        }

        Ok(parts.join(to))
    }
}

// ===== BUILD CONFIGURATION =====

struct BuildConfiguration {
    output_dir: PathBuf,
    resources_dir: PathBuf,
    resources_ui_file: PathBuf,
    stylesheet_file: PathBuf,
    catalog_source_file: PathBuf,
    catalog_generator_files: [PathBuf; 2],
    catalog_file: PathBuf,
    templates_xml_file: PathBuf,
    resources_xml_file: PathBuf,
    compiled_resources_file: PathBuf,
}

impl BuildConfiguration {
    fn new() -> Result<Self> {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let resources_dir = root.join("resources");
        let resources_ui_file = resources_dir.join("ui.xml");
        let stylesheet_file = resources_dir.join("style.css");
        let catalog_source_file = resources_dir.join("catalog.toml");
        let catalog_generator_files = [root.join("build.rs"), root.join("src/models/selection.rs")];
        let output_dir = PathBuf::from(std::env::var("OUT_DIR").context("OUT_DIR is not set")?);
        let catalog_file = output_dir.join("catalog.rs");
        let resources_xml_file = output_dir.join("resources.xml");
        let templates_xml_file = output_dir.join("templates.xml");
        let compiled_resources_file = output_dir.join(RESOURCES_FILE_NAME);

        Ok(Self {
            output_dir,
            resources_dir,
            resources_ui_file,
            stylesheet_file,
            catalog_source_file,
            catalog_generator_files,
            catalog_file,
            templates_xml_file,
            resources_xml_file,
            compiled_resources_file,
        })
    }
}

// ===== APPLICATION METADATA =====

struct ApplicationMetadata {
    name: &'static str,
    description: &'static str,
    version: &'static str,
    id: String,
    prefix: String,
    title: String,
    author: String,
}

impl ApplicationMetadata {
    fn extract_from_cargo() -> Result<Self> {
        let name = env!("CARGO_PKG_NAME");
        let description = env!("CARGO_PKG_DESCRIPTION");
        let version = env!("CARGO_PKG_VERSION");

        let manifest: toml::Value = toml::from_str(MANIFEST_TOML)
            .context("Failed to parse Cargo.toml")?;

        let package = manifest.get("package")
            .context("Missing [package] section in Cargo.toml")?;

        let metadata = package.get("metadata")
            .context("Missing [package.metadata] section in Cargo.toml")?;

        let id = TomlReader::string(metadata, "id")?;
        let prefix = TomlReader::string(metadata, "prefix")?;
        let title = TomlReader::string(metadata, "title")?;
        let author = TomlReader::string(metadata, "author")?;

        Ok(Self {
            name,
            description,
            version,
            id,
            prefix,
            title,
            author,
        })
    }
}

// ===== TOML HELPERS =====

struct TomlReader;

impl TomlReader {
    fn string(value: &toml::Value, key: &str) -> Result<String> {
        value.get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .context(format!("Key '{key}' is missing or not a string"))
    }

    fn table<'a>(value: &'a toml::Value, key: &str) -> Result<&'a toml::value::Table> {
        value.get(key)
            .context(format!("Missing key '{key}'"))?
            .as_table()
            .context(format!("Key '{key}' is not a table"))
    }

    fn array<'a>(value: &'a toml::Value, key: &str) -> Result<&'a [toml::Value]> {
        value.get(key)
            .context(format!("Missing key '{key}'"))?
            .as_array()
            .map(Vec::as_slice)
            .context(format!("Key '{key}' is not an array"))
    }
}

// ===== FILE SYSTEM HELPERS =====

struct FileSystemHelper;

impl FileSystemHelper {
    fn is_target_newer_than_source(source: &Path, target: &Path) -> Result<bool> {
        let source_time = source.metadata()?.modified()?;
        let target_time = target.metadata()?.modified()?;

        Ok(source_time < target_time)
    }

    fn target_exists_and_is_newer(source: &Path, target: &Path) -> Result<bool> {
        Ok(target.exists() && Self::is_target_newer_than_source(source, target)?)
    }
}

// ===== CATALOG SOURCE =====

struct MapRecord {
    key: String,
    scenario: Scenario,
    scale: Scale,
    summary: String,
    path: String,
}

struct SeasonalRecord {
    month: Month,
    paths: Vec<(Scenario, String)>,
}

struct CatalogSource {
    maps: Vec<MapRecord>,
    seasonal: Vec<SeasonalRecord>,
}

// ===== CATALOG EXTRACTOR =====

struct CatalogExtractor;

impl CatalogExtractor {
    fn extract_from_toml(text: &str) -> Result<CatalogSource> {
        let document: toml::Value = toml::from_str(text)
            .context("Failed to parse resources/catalog.toml")?;

        let maps = TomlReader::array(&document, "maps")?
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Self::extract_map_record(value)
                    .with_context(|| format!("Invalid [[maps]] entry #{index}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut seasonal = TomlReader::table(&document, "seasonal")?
            .iter()
            .map(|(month, scenarios)| {
                Self::extract_seasonal_record(month, scenarios)
                    .with_context(|| format!("Invalid [seasonal.{month}] table"))
            })
            .collect::<Result<Vec<_>>>()?;
        seasonal.sort_by_key(|record| record.month as usize);

        Ok(CatalogSource { maps, seasonal })
    }

    fn extract_map_record(value: &toml::Value) -> Result<MapRecord> {
        let scenario = TomlReader::string(value, "scenario")?;
        let scale = TomlReader::string(value, "scale")?;

        Ok(MapRecord {
            key: TomlReader::string(value, "key")?,
            scenario: Scenario::parse(&scenario).context(format!("Unknown scenario '{scenario}'"))?,
            scale: Scale::parse(&scale).context(format!("Unknown scale '{scale}'"))?,
            summary: TomlReader::string(value, "summary")?,
            path: TomlReader::string(value, "path")?,
        })
    }

    fn extract_seasonal_record(month: &str, scenarios: &toml::Value) -> Result<SeasonalRecord> {
        let month = Month::parse(month).context(format!("Unknown month '{month}'"))?;
        let table = scenarios.as_table().context("Expected a table of scenario paths")?;

        let mut paths = Vec::new();
        for (scenario, path) in table {
            let scenario = Scenario::parse(scenario).context(format!("Unknown scenario '{scenario}'"))?;
            let path = path.as_str().context(format!("Path for {scenario} is not a string"))?;
            paths.push((scenario, path.to_string()));
        }
        paths.sort_by_key(|(scenario, _)| *scenario as usize);

        Ok(SeasonalRecord { month, paths })
    }
}

// ===== CATALOG VALIDATOR =====

struct CatalogValidator;

impl CatalogValidator {
    fn validate(source: &CatalogSource) -> Result<()> {
        Self::validate_unique_keys(&source.maps)?;
        Self::validate_paths(source)?;
        Self::validate_comparisons(&source.maps)?;
        Self::validate_seasonal(&source.seasonal)
    }

    fn validate_unique_keys(maps: &[MapRecord]) -> Result<()> {
        let mut seen = HashSet::new();
        for record in maps {
            if !seen.insert(record.key.as_str()) {
                bail!("Duplicate map key '{key}'", key = record.key);
            }
        }
        Ok(())
    }

    fn validate_paths(source: &CatalogSource) -> Result<()> {
        let map_paths = source.maps.iter().map(|record| record.path.as_str());
        let seasonal_paths = source.seasonal
            .iter()
            .flat_map(|record| record.paths.iter().map(|(_, path)| path.as_str()));

        for path in map_paths.chain(seasonal_paths) {
            if path.is_empty() || Path::new(path).is_absolute() {
                bail!("Asset path '{path}' must be a non-empty relative path");
            }
        }
        Ok(())
    }

    fn validate_comparisons(maps: &[MapRecord]) -> Result<()> {
        for &scenario in Scenario::all() {
            for &scale in Scale::all() {
                let offered = maps
                    .iter()
                    .any(|record| record.scenario == scenario && record.scale == scale);
                if !offered {
                    bail!("No decade comparison for {scenario} at {scale} scale");
                }
            }
        }
        Ok(())
    }

    fn validate_seasonal(seasonal: &[SeasonalRecord]) -> Result<()> {
        for &month in Month::all() {
            let record = seasonal
                .iter()
                .find(|record| record.month == month)
                .context(format!("No seasonal imagery for {month}"))?;

            for &scenario in Scenario::all() {
                if !record.paths.iter().any(|(candidate, _)| *candidate == scenario) {
                    bail!("No seasonal image for {month} under {scenario}");
                }
            }
        }
        Ok(())
    }
}

// ===== CATALOG CODE BUILDER =====

struct CatalogCodeBuilder;

impl CatalogCodeBuilder {
    fn format_phf_hash_map<K: AsRef<str>>(map: &HashMap<K, String>) -> String {
        let mut phf_builder = Map::new();
        for (key, value) in map {
            phf_builder.entry(key.as_ref(), value.clone());
        }

        phf_builder.build().to_string()
    }

    fn format_map_entry_struct(record: &MapRecord) -> String {
        format!(
            "MapEntry {{
                key: {key:?},
                scenario: Scenario::{scenario:?},
                scale: Scale::{scale:?},
                summary: {summary:?},
                path: {path:?}
            }}",
            key = record.key,
            scenario = record.scenario,
            scale = record.scale,
            summary = record.summary,
            path = record.path
        )
    }

    fn format_maps_array(maps: &[MapRecord]) -> String {
        maps.iter()
            .map(Self::format_map_entry_struct)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn format_maps_index(maps: &[MapRecord]) -> String {
        let index = maps
            .iter()
            .enumerate()
            .map(|(position, record)| (record.key.as_str(), position.to_string()))
            .collect::<HashMap<_, _>>();

        Self::format_phf_hash_map(&index)
    }

    fn format_seasonal_map(seasonal: &[SeasonalRecord]) -> String {
        let by_month = seasonal
            .iter()
            .map(|record| {
                let by_scenario = record.paths
                    .iter()
                    .map(|(scenario, path)| (scenario.key(), format!("{path:?}")))
                    .collect::<HashMap<_, _>>();
                (record.month.key(), Self::format_phf_hash_map(&by_scenario))
            })
            .collect::<HashMap<_, _>>();

        Self::format_phf_hash_map(&by_month)
    }

    fn build_catalog_struct_code(source: &CatalogSource) -> String {
        let maps_array = Self::format_maps_array(&source.maps);
        let maps_index = Self::format_maps_index(&source.maps);
        let seasonal = Self::format_seasonal_map(&source.seasonal);

        format!(
            "Catalog {{
                maps: &[{maps_array}],
                maps_index: {maps_index},
                seasonal: {seasonal}
            }}"
        )
    }
}

// ===== CATALOG PROCESSOR =====

struct CatalogProcessor<'a> {
    config: &'a BuildConfiguration,
}

impl<'a> CatalogProcessor<'a> {
    fn new(config: &'a BuildConfiguration) -> Self {
        Self { config }
    }

    fn process_catalog_data(&self) -> Result<()> {
        if self.should_use_cached_catalog()? {
            Ok(())
        } else {
            self.regenerate_catalog_data()
        }
    }

    /// The generated code depends on the table and on the code that emits it.
    fn should_use_cached_catalog(&self) -> Result<bool> {
        let sources = std::iter::once(&self.config.catalog_source_file)
            .chain(&self.config.catalog_generator_files);

        for source in sources {
            if !FileSystemHelper::target_exists_and_is_newer(source, &self.config.catalog_file)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn regenerate_catalog_data(&self) -> Result<()> {
        let source = CatalogExtractor::extract_from_toml(CATALOG_TOML)?;
        CatalogValidator::validate(&source)?;

        let catalog_code = CatalogCodeBuilder::build_catalog_struct_code(&source);
        std::fs::write(&self.config.catalog_file, catalog_code)
            .context("Failed to write catalog file")
    }
}

// ===== TEMPLATE EXTRACTOR =====

struct TemplateExtractor {
    template_regex: Regex,
    extracted_templates: HashMap<String, String>,
}

impl TemplateExtractor {
    fn new() -> Result<Self> {
        let template_regex = Regex::new(r#"(?s)<template\s+class="([^"]+)"[^>]*>.*?</template>"#)?;
        let extracted_templates = HashMap::new();
        Ok(Self { template_regex, extracted_templates })
    }

    fn extract_all_templates(&mut self) -> Result<&mut Self> {
        for capture in self.template_regex.captures_iter(UI_XML) {
            if let (Some(template_match), Some(class_match)) = (capture.get(0), capture.get(1)) {
                let class_name = heck::AsSnakeCase(class_match.as_str()).to_string();
                self.extracted_templates.insert(class_name, template_match.as_str().to_string());
            }
        }

        if self.extracted_templates.is_empty() {
            bail!("resources/ui.xml defines no <template> elements");
        }

        Ok(self)
    }

    fn save_template_files_to_directory(&self, output_path: &Path) -> Result<&Self> {
        for (class_name, template_content) in &self.extracted_templates {
            let filename = format!("{class_name}.ui");
            let file_path = output_path.join(filename);
            let formatted_template = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<interface>{template_content}</interface>");
            std::fs::write(file_path, formatted_template)?;
        }
        Ok(self)
    }

    fn build_templates_resources_xml(&self) -> String {
        let mut class_names = self.extracted_templates.keys().collect::<Vec<_>>();
        class_names.sort();

        class_names
            .into_iter()
            .map(|class_name| format!("<file compressed=\"true\" preprocess=\"xml-stripblanks\" alias=\"{class_name}.ui\">{class_name}.ui</file>"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn save_templates_resources_xml_to_file(&self, path: &Path) -> Result<String> {
        let xml_content = self.build_templates_resources_xml();
        std::fs::write(path, &xml_content)?;
        Ok(xml_content)
    }
}

// ===== TEMPLATE PROCESSOR =====

struct TemplateProcessor<'a> {
    config: &'a BuildConfiguration,
}

impl<'a> TemplateProcessor<'a> {
    fn new(config: &'a BuildConfiguration) -> Self {
        Self { config }
    }

    fn process_templates(&self) -> Result<(String, bool)> {
        if self.should_use_cached_templates()? {
            self.load_cached_templates_xml()
        } else {
            self.regenerate_template_resources()
        }
    }

    fn should_use_cached_templates(&self) -> Result<bool> {
        FileSystemHelper::target_exists_and_is_newer(
            &self.config.resources_ui_file,
            &self.config.templates_xml_file
        )
    }

    fn load_cached_templates_xml(&self) -> Result<(String, bool)> {
        let xml_content = std::fs::read_to_string(&self.config.templates_xml_file)?;
        Ok((xml_content, false))
    }

    fn regenerate_template_resources(&self) -> Result<(String, bool)> {
        let xml_content = TemplateExtractor::new()?
            .extract_all_templates()?
            .save_template_files_to_directory(&self.config.output_dir)?
            .save_templates_resources_xml_to_file(&self.config.templates_xml_file)?;

        Ok((xml_content, true))
    }
}

// ===== RESOURCE COMPILER =====

struct ResourceCompiler<'a> {
    config: &'a BuildConfiguration,
    app_prefix: &'a str,
    templates_xml: &'a str,
}

impl<'a> ResourceCompiler<'a> {
    fn new(config: &'a BuildConfiguration, app_prefix: &'a str, templates_xml: &'a str) -> Self {
        Self { config, app_prefix, templates_xml }
    }

    fn compile(&self) -> Result<()> {
        let manifest = self.render_manifest()?;
        std::fs::write(&self.config.resources_xml_file, manifest)?;

        // Generated templates live in OUT_DIR, the stylesheet next to the manifest source.
        glib_build_tools::compile_resources(
            &[&self.config.output_dir, &self.config.resources_dir],
            self.config.resources_xml_file.to_str().context("Invalid manifest path")?,
            self.config.compiled_resources_file.to_str().context("Invalid compiled file path")?,
        );

        Ok(())
    }

    fn render_manifest(&self) -> Result<String> {
        RESOURCES_XML
            .replace_exactly("@APP_TEMPLATES@", self.templates_xml, 1)?
            .replace_exactly("@APP_PREFIX@", self.app_prefix, 1)
    }
}

// ===== CARGO ENVIRONMENT =====

struct CargoEnvironmentVariables;

impl CargoEnvironmentVariables {
    fn emit_application_metadata(metadata: &ApplicationMetadata, resources_path: &Path) {
        println!("cargo:rustc-env=APP_NAME={}", metadata.name);
        println!("cargo:rustc-env=APP_DESCRIPTION={}", metadata.description);
        println!("cargo:rustc-env=APP_VERSION={}", metadata.version);
        println!("cargo:rustc-env=APP_ID={}", metadata.id);
        println!("cargo:rustc-env=APP_PREFIX={}", metadata.prefix);
        println!("cargo:rustc-env=APP_TITLE={}", metadata.title);
        println!("cargo:rustc-env=APP_AUTHORS={}", metadata.author);
        println!("cargo:rustc-env=APP_RESOURCES={}", resources_path.display());
    }
}

// ===== BUILD STATE =====

struct BuildState {
    templates_regenerated: bool,
    stylesheet_changed: bool,
    compiled_resources_missing: bool,
    templates_xml_content: String,
}

impl BuildState {
    fn new(config: &BuildConfiguration) -> Result<Self> {
        let stylesheet_changed = !FileSystemHelper::target_exists_and_is_newer(
            &config.stylesheet_file,
            &config.compiled_resources_file
        )?;

        Ok(Self {
            templates_regenerated: false,
            stylesheet_changed,
            compiled_resources_missing: !config.compiled_resources_file.exists(),
            templates_xml_content: String::new(),
        })
    }

    fn requires_resource_compilation(&self) -> bool {
        self.templates_regenerated || self.stylesheet_changed || self.compiled_resources_missing
    }

    fn update_templates_state(&mut self, xml_content: String, regenerated: bool) {
        self.templates_xml_content = xml_content;
        self.templates_regenerated = regenerated;
    }
}

// ===== BUILD ENVIRONMENT =====

struct BuildEnvironment;

impl BuildEnvironment {
    fn setup_cargo_configuration() {
        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed=src/models/selection.rs");
        println!("cargo:rerun-if-changed=resources");
    }
}

// ===== BUILD PIPELINE =====

struct BuildPipeline {
    config: BuildConfiguration,
    app_metadata: ApplicationMetadata,
}

impl BuildPipeline {
    fn new() -> Result<Self> {
        Ok(Self {
            config: BuildConfiguration::new()?,
            app_metadata: ApplicationMetadata::extract_from_cargo()?,
        })
    }

    fn execute_complete_build(&self) -> Result<()> {
        BuildEnvironment::setup_cargo_configuration();

        let mut build_state = BuildState::new(&self.config)?;

        self.process_catalog_data()?;
        self.process_template_resources(&mut build_state)?;
        self.compile_final_resources(&build_state)?;
        self.emit_cargo_environment_variables();

        Ok(())
    }

    fn process_catalog_data(&self) -> Result<()> {
        CatalogProcessor::new(&self.config).process_catalog_data()
    }

    fn process_template_resources(&self, build_state: &mut BuildState) -> Result<()> {
        let processor = TemplateProcessor::new(&self.config);
        let (xml_content, regenerated) = processor.process_templates()?;
        build_state.update_templates_state(xml_content, regenerated);
        Ok(())
    }

    fn compile_final_resources(&self, build_state: &BuildState) -> Result<()> {
        if !build_state.requires_resource_compilation() {
            return Ok(());
        }

        ResourceCompiler::new(&self.config, &self.app_metadata.prefix, &build_state.templates_xml_content)
            .compile()
    }

    fn emit_cargo_environment_variables(&self) {
        CargoEnvironmentVariables::emit_application_metadata(&self.app_metadata, &self.config.compiled_resources_file);
    }
}

// ===== MAIN =====

fn main() -> Result<()> {
    BuildPipeline::new()?.execute_complete_build()
}
