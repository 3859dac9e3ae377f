use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about)]
pub struct Arguments {
    #[arg(short = 'v', long = None, env = "LAPTIMER_VERBOSITY", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Redraw period of the view in milliseconds.
    #[arg(short, long, env = "LAPTIMER_TICK_MS", default_value_t = 10)]
    pub tick_ms: u64,

    /// Visible rows in the lap list.
    #[arg(short, long, env = "LAPTIMER_ROWS", default_value_t = 8)]
    pub rows: usize,

    /// Disable spoken lap announcements.
    #[arg(short, long, env = "LAPTIMER_QUIET", default_value_t = false)]
    pub quiet: bool,

    /// External text-to-speech program used for announcements.
    #[arg(short, long, env = "LAPTIMER_SPEECH_COMMAND", default_value = "espeak")]
    pub speech_command: String,
}
