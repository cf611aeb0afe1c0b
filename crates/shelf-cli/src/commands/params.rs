//! Parameter listing command.

use clap::Args;
use serde::Serialize;
use shelf_core::{ParamDescriptor, ParameterInfo};
use shelf_effects::LowShelfParametricEq;

/// List the equalizer's parameters.
#[derive(Args)]
pub struct ParamsArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

/// One parameter, as printed by `--json`.
#[derive(Debug, Serialize)]
struct ParamRow {
    address: u64,
    id: &'static str,
    name: &'static str,
    unit: &'static str,
    min: f32,
    max: f32,
    default: f32,
}

impl ParamRow {
    fn new(address: u64, desc: &ParamDescriptor) -> Self {
        Self {
            address,
            id: desc.string_id,
            name: desc.name,
            unit: desc.unit.suffix().trim(),
            min: desc.min,
            max: desc.max,
            default: desc.default,
        }
    }
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let eq = LowShelfParametricEq::new();
    let params: Vec<(u64, ParamDescriptor)> = (0..eq.param_count())
        .filter_map(|i| eq.param_info(i).map(|d| (i as u64, d)))
        .collect();

    if args.json {
        let rows: Vec<ParamRow> = params.iter().map(|(a, d)| ParamRow::new(*a, d)).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Low-shelf parametric EQ parameters\n");
    println!(
        "  {:<8} {:<18} {:<22} {:>12}",
        "Address", "Id", "Range", "Default"
    );
    for (address, desc) in &params {
        println!(
            "  {:<8} {:<18} {:<22} {:>12}",
            address,
            desc.string_id,
            format!(
                "{} to {}",
                desc.format_value(desc.min),
                desc.format_value(desc.max)
            ),
            desc.format_value(desc.default)
        );
    }
    Ok(())
}
