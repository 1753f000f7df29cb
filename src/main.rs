use anyhow::{bail, Context, Result};
use rescuetime::utils::config;
use rescuetime::{AnalyticDataQuery, ClientConfig, RescueTime};

const USAGE: &str = "usage:
  rescuetime summary
  rescuetime data [--tz ZONE] [name=value ...]

The API key is read from RESCUETIME_API_KEY (a .env file is honoured).";

fn main() -> Result<()> {
    config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let client = RescueTime::new(ClientConfig::from_env());

    match args.first().map(String::as_str) {
        Some("summary") => {
            let summaries = client
                .get_daily_summary()
                .context("Failed to fetch daily summary")?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Some("data") => {
            let (timezone, query) = parse_data_args(&args[1..])?;
            let data = client
                .get_analytic_data(timezone.as_deref(), &query)
                .context("Failed to fetch analytic data")?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}

fn parse_data_args(args: &[String]) -> Result<(Option<String>, AnalyticDataQuery)> {
    let mut timezone = None;
    let mut query = AnalyticDataQuery::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--tz" {
            let zone = iter.next().context("--tz needs a zone name")?;
            timezone = Some(zone.clone());
            continue;
        }
        let Some((name, value)) = arg.split_once('=') else {
            bail!("expected name=value, got {:?}\n\n{}", arg, USAGE);
        };
        if !query.set(name, value) {
            bail!("unknown filter {:?}", name);
        }
    }

    Ok((timezone, query))
}
