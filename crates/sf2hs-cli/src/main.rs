//! `sf2hs` command line
//!
//! Object descriptions come from a describe document (`--describe-file`);
//! output is plain text.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use sf2hs_core::{
    CollectRequest, CoreError, FieldCatalog, MigrationConfig, StaticDescriber, SyncRequest,
};
use sf2hs_fields::FieldRecord;
use sf2hs_interchange::{load, Format, LoadError};
use std::path::PathBuf;
use std::process::ExitCode;

fn describe_file_arg(required: bool) -> Arg {
    Arg::new("describe-file")
        .long("describe-file")
        .short('d')
        .required(required)
        .value_parser(value_parser!(PathBuf))
        .help("JSON document of object describe results, keyed by object name")
}

fn config_arg(help: &'static str) -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn object_arg(help: &'static str) -> Arg {
    Arg::new("object").long("object").short('o').help(help)
}

fn format_arg(help: &'static str) -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .default_value("excel")
        .value_parser(["excel", "json"])
        .help(help)
}

fn show_all_args() -> [Arg; 2] {
    [
        Arg::new("show-all")
            .long("show-all")
            .action(ArgAction::SetTrue)
            .overrides_with("hide-non-migratable")
            .help("Include all fields (default)"),
        Arg::new("hide-non-migratable")
            .long("hide-non-migratable")
            .action(ArgAction::SetTrue)
            .overrides_with("show-all")
            .help("Only include fields that can migrate"),
    ]
}

fn cli() -> Command {
    Command::new("sf2hs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Salesforce to HubSpot field migration")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list-fields")
                .about("List the fields of an object with their migration status")
                .arg(describe_file_arg(true))
                .arg(object_arg("Object to list fields for (e.g. Account, Contact, Lead)").required(true))
                .args(show_all_args()),
        )
        .subcommand(
            Command::new("save-fields")
                .about("Save classified fields to an Excel or JSON file")
                .arg(describe_file_arg(true))
                .arg(config_arg("YAML configuration file with object mappings"))
                .arg(object_arg("Object to save fields for"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .default_value("salesforce_fields.xlsx")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output file path"),
                )
                .arg(format_arg("Output format"))
                .args(show_all_args()),
        )
        .subcommand(
            Command::new("load-fields")
                .about("Load and validate field data from an Excel or JSON file")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Field data file"),
                )
                .arg(format_arg("Input file format"))
                .arg(
                    Arg::new("validate-only")
                        .long("validate-only")
                        .action(ArgAction::SetTrue)
                        .help("Only validate the data"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check that configured objects and fields exist")
                .arg(describe_file_arg(true))
                .arg(config_arg("YAML configuration file to validate").required(true)),
        )
        .subcommand(
            Command::new("sync")
                .about("Plan a field sync (config-based, direct or transformed)")
                .arg(describe_file_arg(false))
                .arg(config_arg("YAML configuration file with sync mappings"))
                .arg(object_arg("Object to synchronize"))
                .arg(
                    Arg::new("fields-file")
                        .long("fields-file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Field data file for a transformed sync"),
                )
                .arg(format_arg("Format of the fields file"))
                .arg(
                    Arg::new("direct")
                        .long("direct")
                        .action(ArgAction::SetTrue)
                        .overrides_with("transformed")
                        .help("Sync straight from the source object"),
                )
                .arg(
                    Arg::new("transformed")
                        .long("transformed")
                        .action(ArgAction::SetTrue)
                        .overrides_with("direct")
                        .help("Sync from a fields file (default)"),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("list-fields", args)) => list_fields(args).await,
        Some(("save-fields", args)) => save_fields(args).await,
        Some(("load-fields", args)) => load_fields(args),
        Some(("validate", args)) => validate(args).await,
        Some(("sync", args)) => sync(args).await,
        _ => Ok(ExitCode::SUCCESS),
    }
}

async fn catalog(args: &ArgMatches) -> Result<FieldCatalog<StaticDescriber>> {
    let describer = match args.get_one::<PathBuf>("describe-file") {
        Some(path) => StaticDescriber::load(path)
            .await
            .with_context(|| format!("reading describe file {}", path.display()))?,
        None => StaticDescriber::new(),
    };
    Ok(FieldCatalog::new(describer))
}

fn config(args: &ArgMatches) -> Result<MigrationConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => Ok(MigrationConfig::load(path)?),
        None => Ok(MigrationConfig::default()),
    }
}

fn format(args: &ArgMatches) -> Result<Format> {
    let name = args.get_one::<String>("format").map_or("excel", String::as_str);
    Ok(name.parse::<Format>()?)
}

fn show_all(args: &ArgMatches) -> bool {
    !args.get_flag("hide-non-migratable")
}

fn print_field(field: &FieldRecord) {
    println!(
        "{}\t{}\t{}\trequired={}\tunique={}\tupdateable={}\tcan_migrate={}\t{}\t{}",
        field.name,
        field.label,
        field.field_type,
        field.required,
        field.unique,
        field.updateable,
        field.can_migrate,
        field.migration_type,
        field.migration_notes.join("; "),
    );
}

fn print_defects(defects: &[impl std::fmt::Display]) {
    eprintln!("Validation errors found:");
    for defect in defects {
        eprintln!("- {defect}");
    }
}

async fn list_fields(args: &ArgMatches) -> Result<ExitCode> {
    let object = args.get_one::<String>("object").context("--object is required")?;
    let catalog = catalog(args).await?;

    let fields = match catalog.list_fields(object, show_all(args)).await {
        Ok(fields) => fields,
        Err(CoreError::ObjectNotFound(name)) => {
            eprintln!("Object '{name}' does not exist in Salesforce");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    println!("Fields for {object}:");
    for field in &fields {
        print_field(field);
    }
    Ok(ExitCode::SUCCESS)
}

async fn save_fields(args: &ArgMatches) -> Result<ExitCode> {
    let catalog = catalog(args).await?;
    let request = CollectRequest {
        object: args.get_one::<String>("object").cloned(),
        config: config(args)?,
        show_all: show_all(args),
    };
    let output = args.get_one::<PathBuf>("output").context("--output is required")?;

    let set = catalog.export(&request, output, format(args)?).await?;

    println!("Successfully saved fields for {} object(s) to {}", set.len(), output.display());
    Ok(ExitCode::SUCCESS)
}

fn load_fields(args: &ArgMatches) -> Result<ExitCode> {
    let input = args.get_one::<PathBuf>("input").context("--input is required")?;

    let set = match load(input, format(args)?) {
        Ok(set) => set,
        Err(LoadError::Invalid { defects }) => {
            print_defects(&defects);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    println!("Successfully validated {} objects", set.len());
    if !args.get_flag("validate-only") {
        for (object, records) in &set {
            println!("  {object}: {} field(s)", records.len());
        }
        println!("Data loaded and ready for sync");
    }
    Ok(ExitCode::SUCCESS)
}

async fn validate(args: &ArgMatches) -> Result<ExitCode> {
    let path = args.get_one::<PathBuf>("config").context("--config is required")?;
    let config = MigrationConfig::load(path)?;
    let catalog = catalog(args).await?;

    let issues = catalog.check_config(&config).await?;
    for issue in &issues {
        eprintln!("{issue}");
    }
    if !issues.is_empty() {
        return Ok(ExitCode::FAILURE);
    }

    println!("Successfully validated configuration file: {}", path.display());
    Ok(ExitCode::SUCCESS)
}

async fn sync(args: &ArgMatches) -> Result<ExitCode> {
    let catalog = catalog(args).await?;
    let request = SyncRequest {
        config: config(args)?,
        object: args.get_one::<String>("object").cloned(),
        fields_file: args.get_one::<PathBuf>("fields-file").cloned(),
        format: format(args)?,
        direct: args.get_flag("direct"),
    };

    let plan = match catalog.plan_sync(&request).await {
        Ok(plan) => plan,
        Err(CoreError::Load(LoadError::Invalid { defects })) => {
            print_defects(&defects);
            return Ok(ExitCode::FAILURE);
        }
        Err(CoreError::ObjectNotFound(name)) => {
            eprintln!("Object '{name}' does not exist in Salesforce");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let objects: Vec<&str> = plan.fields.keys().map(String::as_str).collect();
    println!("Starting sync process...");
    println!("Mode: {}", plan.mode);
    println!("Objects: {}", objects.join(", "));
    println!("Fields: {}", plan.field_count());
    Ok(ExitCode::SUCCESS)
}
