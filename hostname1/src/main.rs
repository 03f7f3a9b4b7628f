use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hostname1::{BusConfig, Hostname1};

#[derive(Parser, Debug)]
#[command(name = "hostname1")]
#[command(about = "Query and change the system hostname via systemd-hostnamed", long_about = None)]
struct Cli {
    /// D-Bus address to use instead of the system bus
    ///
    /// Overrides HOSTNAME1_BUS_ADDRESS.
    #[arg(long, global = true)]
    address: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show all hostnamed properties
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Show a single property by its D-Bus name (e.g. KernelRelease)
    Get {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Show the transient hostname
    Hostname,
    /// Show the static hostname
    StaticHostname,
    /// Show the pretty hostname
    PrettyHostname,
    /// Show the icon name
    IconName,
    /// Show the chassis type
    Chassis,
    /// Set the transient hostname
    SetHostname(SetArgs),
    /// Set the static hostname
    SetStaticHostname(SetArgs),
    /// Set the pretty hostname
    SetPrettyHostname(SetArgs),
    /// Set the icon name
    SetIconName(SetArgs),
    /// Set the chassis type
    SetChassis(SetArgs),
    /// Set the deployment environment
    SetDeployment(SetArgs),
    /// Set the location
    SetLocation(SetArgs),
}

#[derive(Args, Debug)]
struct SetArgs {
    value: String,

    /// Let polkit prompt for authorization if needed
    #[arg(long)]
    ask_password: bool,
}

fn main() {
    // e.g., RUST_LOG=hostname1=debug
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.address {
        Some(address) => BusConfig::with_address(address)?,
        None => BusConfig::from_env()?,
    };
    tracing::debug!(bus = %config, "Resolved bus configuration");

    let client = Hostname1::connect(&config)?;
    execute(&client, cli.command)?;
    client.close().context("Failed to close bus connection")?;
    Ok(())
}

fn execute(client: &Hostname1, command: Commands) -> Result<()> {
    match command {
        Commands::Status { json } => {
            let properties = client
                .properties()
                .context("Failed to read hostnamed properties")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&properties)?);
            } else {
                let width = properties.keys().map(String::len).max().unwrap_or(0);
                for (name, value) in &properties {
                    println!("{name:>width$}: {value}");
                }
            }
        }
        Commands::Get { name, json } => {
            let value = client
                .property(&name)
                .with_context(|| format!("Failed to read property {name}"))?;
            if json {
                println!("{}", serde_json::to_string(&value)?);
            } else {
                println!("{value}");
            }
        }
        Commands::Hostname => println!("{}", client.hostname()?),
        Commands::StaticHostname => println!("{}", client.static_hostname()?),
        Commands::PrettyHostname => println!("{}", client.pretty_hostname()?),
        Commands::IconName => println!("{}", client.icon_name()?),
        Commands::Chassis => println!("{}", client.chassis()?),
        Commands::SetHostname(args) => client
            .set_hostname(&args.value, args.ask_password)
            .context("Failed to set hostname")?,
        Commands::SetStaticHostname(args) => client
            .set_static_hostname(&args.value, args.ask_password)
            .context("Failed to set static hostname")?,
        Commands::SetPrettyHostname(args) => client
            .set_pretty_hostname(&args.value, args.ask_password)
            .context("Failed to set pretty hostname")?,
        Commands::SetIconName(args) => client
            .set_icon_name(&args.value, args.ask_password)
            .context("Failed to set icon name")?,
        Commands::SetChassis(args) => client
            .set_chassis(&args.value, args.ask_password)
            .context("Failed to set chassis")?,
        Commands::SetDeployment(args) => client
            .set_deployment(&args.value, args.ask_password)
            .context("Failed to set deployment")?,
        Commands::SetLocation(args) => client
            .set_location(&args.value, args.ask_password)
            .context("Failed to set location")?,
    }
    Ok(())
}
