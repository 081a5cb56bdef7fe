use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use dotenvy::dotenv;
use tracing::{error, info};

use configs::{AppConfig, CodecConfig, LogFormat, OutputFormat};
use models::codec::{from_json_str, to_json_string, xml::to_xml_string};
use models::{
    Errors, PostServiceRequestInput, Service, ServiceDefinition, ServiceRequest, ServiceRequestCreated,
    ServiceRequestToken, ServiceRequests, Services, SubmittedAttributes, WireDocument,
};
use service::catalog::memory::{InMemoryJurisdictions, InMemoryServiceStore};
use service::validation::SchemaAttributeValidator;
use service::{AttributeValidator, ServiceError};

const USAGE: &str = "usage:
  georeport validate <definition.json> <submitted.json>
  georeport render <service|services|definition|request|requests|tokens|created|errors> <file.json>";

const LOCAL_JURISDICTION: &str = "local";

fn init_logging(cfg: &AppConfig) {
    common::utils::logging::init_logging(cfg.logging.format == LogFormat::Json, cfg.logging.filter.as_deref());
    info!(service = "georeport", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> ExitCode {
    dotenv().ok();
    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "georeport", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&cfg);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["validate", definition, submitted] => validate_command(&cfg.codec, definition, submitted),
        ["render", kind, file] => render_command(&cfg.codec, kind, file).map(|_| true),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(service = "georeport", event = "command_failed", error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn render<T: WireDocument>(doc: &T, codec: &CodecConfig) -> Result<String> {
    Ok(match codec.format {
        OutputFormat::Json => to_json_string(doc, codec.pretty)?,
        OutputFormat::Xml => to_xml_string(doc)?,
    })
}

fn read(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {path}"))
}

fn decode_and_render<T: WireDocument>(text: &str, codec: &CodecConfig) -> Result<String> {
    let doc: T = from_json_str(text)?;
    render(&doc, codec)
}

fn render_command(codec: &CodecConfig, kind: &str, file: &str) -> Result<()> {
    let text = read(file)?;
    let out = match kind {
        "service" => decode_and_render::<Service>(&text, codec)?,
        "services" => decode_and_render::<Services>(&text, codec)?,
        "definition" => decode_and_render::<ServiceDefinition>(&text, codec)?,
        "request" => decode_and_render::<ServiceRequest>(&text, codec)?,
        "requests" => decode_and_render::<ServiceRequests<ServiceRequest>>(&text, codec)?,
        "tokens" => decode_and_render::<ServiceRequests<ServiceRequestToken>>(&text, codec)?,
        "created" => decode_and_render::<ServiceRequests<ServiceRequestCreated>>(&text, codec)?,
        "errors" => decode_and_render::<Errors>(&text, codec)?,
        other => bail!("unknown document kind `{other}`\n{USAGE}"),
    };
    println!("{out}");
    Ok(())
}

/// Prints the failures as an errors document; `Ok(false)` when any were found.
fn validate_command(codec: &CodecConfig, definition: &str, submitted: &str) -> Result<bool> {
    let schema: ServiceDefinition = from_json_str(&read(definition)?)?;
    schema.check_consistency()?;
    let answers: serde_json::Value = serde_json::from_str(&read(submitted)?).with_context(|| format!("cannot parse {submitted}"))?;
    let attributes = SubmittedAttributes::from_json(&answers)?;

    let svc = Service { metadata: true, ..Service::new(schema.service_code.clone()) };
    let input = PostServiceRequestInput {
        jurisdiction_id: Some(LOCAL_JURISDICTION.to_string()),
        attributes,
        ..PostServiceRequestInput::new(schema.service_code.clone())
    };
    let store = InMemoryServiceStore::default().with_service(svc.clone(), Some(schema));
    let routes = Arc::new(InMemoryJurisdictions::default().with_store(LOCAL_JURISDICTION, store));
    let validator = SchemaAttributeValidator::new(routes);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("failed to build tokio runtime: {e}"))?;
    let failures = rt.block_on(validator.validate_metadata(&svc, &input))?;

    info!(service = "georeport", event = "validated", service_code = svc.code(), failures = failures.len());
    let accepted = failures.is_empty();
    let errors = if accepted { Errors::new() } else { ServiceError::Validation(failures).to_errors() };
    println!("{}", render(&errors, codec)?);
    Ok(accepted)
}
