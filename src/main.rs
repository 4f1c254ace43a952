/*!
 * Permbits CLI
 * Encode, decode and pack bitmasks from the command line
 */

use anyhow::{bail, Context, Result};
use log::info;
use permbits::{pack, unpack, BitmaskCodec, CodecConfig};
use std::fs;

const USAGE: &str = "\
usage: permbits [--config <file.json>] <command>

commands:
  encode <text>                  \"DOCUMENTS:VIEW,EDIT\" -> bitmask
  decode <bitmask>               bitmask -> string form and flags
  pack [--url-safe] <n>...       bitmasks -> packed string
  unpack [--url-safe] <packed>   packed string -> bitmasks";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = take_option(&mut args, "--config")?;
    let url_safe = take_flag(&mut args, "--url-safe");

    let Some((command, rest)) = args.split_first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    match command.as_str() {
        "encode" => {
            let codec = load_codec(config_path.as_deref())?;
            let text = rest.first().context("encode needs a <text> argument")?;
            println!("{}", codec.from_string(text));
        }
        "decode" => {
            let codec = load_codec(config_path.as_deref())?;
            let raw = rest.first().context("decode needs a <bitmask> argument")?;
            let bitmask: u32 = raw
                .parse()
                .with_context(|| format!("{:?} is not an unsigned 32-bit integer", raw))?;
            println!("{}", codec.to_string(bitmask));
            println!("{}", serde_json::to_string_pretty(&codec.parse(bitmask))?);
        }
        "pack" => {
            let values = rest
                .iter()
                .map(|raw| {
                    raw.parse::<u32>()
                        .with_context(|| format!("{:?} is not an unsigned 32-bit integer", raw))
                })
                .collect::<Result<Vec<_>>>()?;
            println!("{}", pack(&values, url_safe));
        }
        "unpack" => {
            let packed = rest.first().context("unpack needs a <packed> argument")?;
            for value in unpack(packed, url_safe)? {
                println!("{}", value);
            }
        }
        "help" | "--help" | "-h" => println!("{}", USAGE),
        other => bail!("unknown command {:?}\n\n{}", other, USAGE),
    }

    Ok(())
}

fn load_codec(path: Option<&str>) -> Result<BitmaskCodec> {
    match path {
        Some(path) => {
            let json = fs::read(path).with_context(|| format!("reading {}", path))?;
            let codec = CodecConfig::from_json_slice(&json)
                .and_then(CodecConfig::build)
                .with_context(|| format!("loading configuration from {}", path))?;
            info!("Using configuration from {}", path);
            Ok(codec)
        }
        None => Ok(sample_codec()?),
    }
}

/// Schema used when no configuration file is given
fn sample_codec() -> permbits::RegistryResult<BitmaskCodec> {
    BitmaskCodec::builder()
        .permissions([("VIEW", 1), ("EDIT", 2), ("DELETE", 4), ("SHARE", 8), ("PRINT", 16)])
        .access_bits(6)
        .group("DOCUMENTS", 1)
        .group("PHOTOS", 2)
        .group("VIDEOS", 3)
        .permission_set("EDITOR", ["VIEW", "EDIT"])
        .build()
}

fn take_option(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    let Some(position) = args.iter().position(|arg| arg == name) else {
        return Ok(None);
    };
    if position + 1 >= args.len() {
        bail!("{} needs a value", name);
    }
    let value = args.remove(position + 1);
    args.remove(position);
    Ok(Some(value))
}

fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    match args.iter().position(|arg| arg == name) {
        Some(position) => {
            args.remove(position);
            true
        }
        None => false,
    }
}
