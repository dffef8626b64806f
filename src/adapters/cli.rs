use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};

use crate::adapters::form::{self, Form};
use crate::error::AppError;
use crate::models::{
    ConcentrationResult, ConversionResult, NeubauerResult, PhResult, Settings, TypeOption,
    UnitType,
};
use crate::services::{concentration, conversion, ph};

#[derive(Parser, Debug)]
#[command(author, version, about = "Chemistry calculators: unit conversion, concentration, Neubauer counts and pH", long_about = None)]
pub struct Args {
    #[arg(long, global = true, help = "Print the result as JSON")]
    pub json: bool,
    #[arg(short, long, action = ArgAction::Count, global = true, help = "More log output on stderr (-v info, -vv debug)")]
    pub verbose: u8,
    #[arg(
        long,
        value_name = "JSON",
        global = true,
        help = "Inline JSON overriding default settings (default_kw, default_equivalents)"
    )]
    pub settings_json: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a value between mass, temperature or volume units
    Convert(FormArgs),
    /// Molarity, molality, dilution, mass/volume, ppm and percentage
    Concentration(FormArgs),
    /// Cell concentration from a Neubauer chamber count
    Neubauer(FormArgs),
    /// pH of a strong acid or strong base solution
    Ph(FormArgs),
    /// List the units available for a unit type
    Units { unit_type: String },
    /// List the calculation types and unit types
    Types,
}

#[derive(clap::Args, Debug)]
pub struct FormArgs {
    #[arg(
        short = 'f',
        long = "field",
        value_name = "KEY=VALUE",
        help = "Form field; repeatable, overrides values from --form-json/--input"
    )]
    pub fields: Vec<String>,
    #[arg(
        long,
        value_name = "JSON",
        help = "Inline JSON object with the form fields (overrides --input)"
    )]
    pub form_json: Option<String>,
    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file with the form fields; '-' reads from stdin"
    )]
    pub input: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum Output {
    Conversion(ConversionResult),
    Concentration(ConcentrationResult),
    Neubauer(NeubauerResult),
    Ph(PhResult),
    Units {
        unit_type: UnitType,
        units: Vec<&'static str>,
    },
    Types {
        concentration: Vec<TypeOption>,
        ph: Vec<TypeOption>,
        unit_types: Vec<UnitType>,
    },
}

pub fn init_logging(args: &Args) {
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // A logger may already be installed when embedded; keep that one.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}

pub fn parse_settings(args: &Args) -> Result<Settings, AppError> {
    let settings = match &args.settings_json {
        Some(s) => serde_json::from_str::<Settings>(s)
            .map_err(|source| AppError::ParseSettingsJson { source })?,
        None => Settings::default(),
    };
    Ok(settings.normalized())
}

/// JSON documents may carry numbers or strings; both become raw field text.
fn form_from_json(
    doc: &str,
    on_err: fn(serde_json::Error) -> AppError,
) -> Result<Form, AppError> {
    let map: BTreeMap<String, serde_json::Value> = serde_json::from_str(doc).map_err(on_err)?;
    Ok(map
        .into_iter()
        .map(|(k, v)| {
            let raw = match v {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (k, raw)
        })
        .collect())
}

pub fn parse_form(args: &FormArgs) -> Result<Form, AppError> {
    let mut form = match (&args.form_json, &args.input) {
        (Some(doc), _) => form_from_json(doc, |source| AppError::ParseFormJson { source })?,
        (None, Some(path)) if path == "-" => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .map_err(|source| AppError::ReadStdin { source })?;
            form_from_json(&s, |source| AppError::ParseInputDocument { source })?
        }
        (None, Some(path)) => {
            let s = fs::read_to_string(path).map_err(|source| AppError::ReadFile {
                path: path.clone(),
                source,
            })?;
            form_from_json(&s, |source| AppError::ParseInputDocument { source })?
        }
        (None, None) if args.fields.is_empty() => return Err(AppError::MissingInputData),
        (None, None) => Form::new(),
    };

    for field in &args.fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| AppError::MalformedField(field.clone()))?;
        form.insert(key.trim(), value);
    }
    Ok(form)
}

pub fn execute(command: &Command, settings: &Settings) -> Result<Output, AppError> {
    let out = match command {
        Command::Convert(f) => Output::Conversion(form::run_conversion(&parse_form(f)?)?),
        Command::Concentration(f) => {
            Output::Concentration(form::run_concentration(&parse_form(f)?)?)
        }
        Command::Neubauer(f) => Output::Neubauer(form::run_neubauer(&parse_form(f)?)?),
        Command::Ph(f) => Output::Ph(form::run_ph(&parse_form(f)?, settings)?),
        Command::Units { unit_type } => {
            let unit_type: UnitType = unit_type.parse()?;
            Output::Units {
                unit_type,
                units: conversion::available_units(unit_type),
            }
        }
        Command::Types => Output::Types {
            concentration: concentration::calculation_types(),
            ph: ph::calculation_types(),
            unit_types: conversion::unit_types(),
        },
    };
    Ok(out)
}

pub fn print_output(out: &Output, args: &Args) -> Result<(), AppError> {
    if args.json {
        let s = serde_json::to_string_pretty(out)
            .map_err(|source| AppError::SerializeOutput { source })?;
        println!("{}", s);
        return Ok(());
    }

    match out {
        Output::Conversion(c) => {
            println!(
                "{} {} = {} {}",
                c.original_value, c.from_unit, c.converted_value, c.to_unit
            );
        }
        Output::Concentration(c) => print_concentration(c),
        Output::Neubauer(n) => {
            println!("Total cells: {}", n.total_cells);
            println!("Average per quadrant: {:.2}", n.average_cells);
            println!("Concentration: {:.4e} cells/mL", n.concentration);
        }
        Output::Ph(p) => {
            println!("pH: {:.4}", p.ph);
            println!("pOH: {:.4}", p.poh);
            println!("[H3O+]: {:.4e} mol/L", p.hydronium);
            println!("[OH-]: {:.4e} mol/L", p.hydroxide);
            println!("Formula: {}", p.formula_used);
            if let Some(note) = p.notes {
                println!("Note: {}", note);
            }
        }
        Output::Units { units, .. } => {
            for u in units {
                println!("{}", u);
            }
        }
        Output::Types {
            concentration,
            ph,
            unit_types,
        } => {
            println!("Concentration:");
            for t in concentration {
                println!("  {:<12} {}", t.value, t.label);
            }
            println!("pH:");
            for t in ph {
                println!("  {:<12} {}", t.value, t.label);
            }
            println!("Unit types:");
            for u in unit_types {
                println!("  {:<12} {}", u.as_str(), u.label());
            }
        }
    }

    Ok(())
}

fn print_concentration(c: &ConcentrationResult) {
    let rows = [
        ("Molarity", c.molarity, "mol/L"),
        ("Molality", c.molality, "mol/kg"),
        ("Moles", c.moles, "mol"),
        ("Volume", c.volume_l, "L"),
        ("Volume", c.volume_ml, "mL"),
        ("Solvent", c.kg_solvent, "kg"),
        ("Mass", c.mass_g, "g"),
        ("C1", c.c1, ""),
        ("V1", c.v1, ""),
        ("C2", c.c2, ""),
        ("V2", c.v2, ""),
        ("Concentration", c.concentration_mg_ml, "mg/mL"),
        ("Concentration", c.concentration_g_l, "g/L"),
        ("ppm", c.ppm, ""),
        ("Percentage", c.percentage, "%"),
    ];
    for (label, value, unit) in rows {
        if let Some(v) = value {
            println!("{}: {:.4} {}", label, v, unit);
        }
    }
    println!("Formula: {}", c.formula_used);
    if let Some(note) = c.notes {
        println!("Note: {}", note);
    }
}
