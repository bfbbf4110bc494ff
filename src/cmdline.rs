use clap::{Parser, Subcommand};

/// Command line tools for DVRIP video recorders.
#[derive(Parser, Debug)]
#[command(name = "dvrip", version, about)]
pub struct Opt {
    /// Device hostname or address
    #[arg(short = 'H', long, env = "DVR_HOST", global = true)]
    pub host: Option<String>,
    /// Device control port
    #[arg(
        short,
        long,
        env = "DVR_SERV",
        default_value_t = dvrip_core::client::PORT,
        global = true
    )]
    pub port: u16,
    /// Account to log in as
    #[arg(
        short,
        long,
        env = "DVR_USERNAME",
        default_value = "admin",
        global = true
    )]
    pub username: String,
    /// Password for the account
    #[arg(
        long,
        env = "DVR_PASSWORD",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    pub password: String,
    /// What to do
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the local network for devices
    Discover(crate::discover::Opt),
    /// Print general system information
    Info,
    /// Print the device clock, or set it
    Time(crate::clock::Opt),
    /// Search the recorded file index
    Find(crate::find::Opt),
    /// Print the device log
    Log(crate::logs::Opt),
    /// Stream a recording or a live monitor to standard output
    Cat(crate::cat::Opt),
    /// Reboot the device
    Reboot,
}
