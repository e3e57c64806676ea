use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use log::{error, info};
use seahorse::{App, Command, Context, Flag, FlagType};

use office_quota::config::{Config, Region};
use office_quota::store::Color;
use office_quota::time::{MonthKey, WeekDay};
use office_quota::{Session, StatusCode};

/// Looked up in the working directory if no `--config` is given.
const DEFAULT_CONFIG_FILE: &str = "office-quota.toml";

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("OFFICE_QUOTA_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("OFFICE_QUOTA_LOG");

    run();
}

type Action = fn(&Context) -> anyhow::Result<()>;

fn try_action(context: &Context, action: Action) {
    if let Err(e) = action(context) {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

fn optional_string_flag(context: &Context, name: &str) -> Option<String> {
    context.string_flag(name).ok()
}

fn build_config(context: &Context) -> anyhow::Result<Config> {
    let mut builder = match optional_string_flag(context, "config").map(PathBuf::from) {
        Some(path) => Config::try_from_toml_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            Config::try_from_toml_file(DEFAULT_CONFIG_FILE)?
        }
        None => Config::builder(),
    };

    if let Some(data_file) = optional_string_flag(context, "data") {
        builder.data_file(data_file);
    }

    if let Some(region) = optional_string_flag(context, "region") {
        builder.region(region.parse::<Region>()?);
    }

    Ok(builder.build())
}

fn current_month() -> anyhow::Result<MonthKey> {
    let today = time::OffsetDateTime::now_utc().date();

    Ok(MonthKey::from_numbers(
        today.year(),
        usize::from(u8::from(today.month())),
    )?)
}

fn open_session(context: &Context) -> anyhow::Result<Session> {
    let config = build_config(context)?;

    let cursor = match optional_string_flag(context, "month") {
        Some(month) => month.parse::<MonthKey>()?,
        None => current_month()?,
    };

    info!("using data file \"{}\"", config.data_file().display());

    Session::open(config.document(), config.holidays().classifier(), cursor)
        .with_context(|| format!("failed to open {}", cursor))
}

fn print_month(session: &Session) {
    let key = session.cursor();
    let classifier = session.classifier();

    println!("{} {}", key.month().name(), key.year());
    println!(
        "{}",
        WeekDay::week_days()
            .iter()
            .map(|day| format!("{:>5}", day.short_name()))
            .collect::<String>()
    );

    let mut line = String::new();
    for date in key.days() {
        if date.day() == 1 {
            line.push_str(&" ".repeat(5 * (date.week_day().as_usize() - 1)));
        }

        let code = match session.status_of(date.day()) {
            StatusCode::Empty if classifier.is_non_working(date) => "-",
            StatusCode::Empty => ".",
            status => status.code(),
        };
        line.push_str(&format!("{:>4}{}", date.day(), code));

        if date.week_day() == WeekDay::Sunday {
            println!("{}", line);
            line.clear();
        }
    }

    if !line.is_empty() {
        println!("{}", line);
    }

    println!();
    println!(
        "{}",
        StatusCode::colored()
            .iter()
            .map(|status| format!(
                "{} = {} ({})",
                status.code(),
                status,
                session.get_color_for(status.code())
            ))
            .collect::<Vec<_>>()
            .join(" | ")
    );
    println!("{}", session.calculate_stats());
}

fn show(context: &Context) -> anyhow::Result<()> {
    let session = open_session(context)?;
    print_month(&session);
    Ok(())
}

fn toggle(context: &Context) -> anyhow::Result<()> {
    if context.args.is_empty() {
        return Err(anyhow::anyhow!("missing the days to toggle"));
    }

    let mut session = open_session(context)?;

    for day in &context.args {
        let day = day
            .parse::<usize>()
            .with_context(|| format!("\"{}\" is not a day", day))?;
        session.toggle_status(day)?;
    }

    print_month(&session);
    Ok(())
}

fn move_by(context: &Context, delta: i64) -> anyhow::Result<()> {
    let mut session = open_session(context)?;
    session.change_month(delta)?;
    print_month(&session);
    Ok(())
}

fn next(context: &Context) -> anyhow::Result<()> {
    move_by(context, 1)
}

fn prev(context: &Context) -> anyhow::Result<()> {
    move_by(context, -1)
}

fn shift(context: &Context) -> anyhow::Result<()> {
    let delta = context
        .int_flag("by")
        .map_err(|e| anyhow::anyhow!("missing or invalid flag \"by\": {:?}", e))?;

    move_by(context, delta as i64)
}

fn color(context: &Context) -> anyhow::Result<()> {
    let (status, picked) = match context.args.as_slice() {
        [status] => (status, None),
        [status, color] => (status, Some(color.parse::<Color>()?)),
        _ => {
            return Err(anyhow::anyhow!(
                "expected a status and optionally a color, like `color O #66bb6a`"
            ))
        }
    };
    let status = status.parse::<StatusCode>()?;

    let mut session = open_session(context)?;
    session.choose_color_for(status, picked)?;

    println!("{} = {}", status, session.get_color_for(status.code()));
    Ok(())
}

fn with_common_flags(command: Command) -> Command {
    command
        .flag(Flag::new("config", FlagType::String).description(
            "[optional] Path to the config file. Default: `office-quota.toml` if it exists",
        ))
        .flag(
            Flag::new("data", FlagType::String)
                .description("[optional] Path to the data file. Default: `monthly.json`"),
        )
        .flag(
            Flag::new("region", FlagType::String)
                .description("[optional] Public holidays to respect: `TR` or `DE-BW`"),
        )
        .flag(
            Flag::new("month", FlagType::String)
                .description("[optional] The month to work on, like `2024-3`. Default: this month"),
        )
}

fn run() {
    let args: Vec<String> = env::args().collect();

    let show_command = with_common_flags(
        Command::new("show")
            .usage(format!("{} show [args]", args[0]))
            .description("Shows the month and whether the office quota is met."),
    )
    .action(|context: &Context| try_action(context, show));

    let toggle_command = with_common_flags(
        Command::new("toggle")
            .usage(format!("{} toggle [args] <day>...", args[0]))
            .description("Cycles the days through empty, office, home and leave."),
    )
    .action(|context: &Context| try_action(context, toggle));

    let next_command = with_common_flags(
        Command::new("next")
            .usage(format!("{} next [args]", args[0]))
            .description("Shows the month after the current one."),
    )
    .action(|context: &Context| try_action(context, next));

    let prev_command = with_common_flags(
        Command::new("prev")
            .usage(format!("{} prev [args]", args[0]))
            .description("Shows the month before the current one."),
    )
    .action(|context: &Context| try_action(context, prev));

    let move_command = with_common_flags(
        Command::new("move")
            .usage(format!("{} move --by <months> [args]", args[0]))
            .description("Shows the month that is the given number of months away."),
    )
    .flag(Flag::new("by", FlagType::Int).description("Number of months to move, may be negative."))
    .action(|context: &Context| try_action(context, shift));

    let color_command = with_common_flags(
        Command::new("color")
            .usage(format!("{} color [args] <O|E|I> [#rrggbb]", args[0]))
            .description("Shows or changes the color of a status."),
    )
    .action(|context: &Context| try_action(context, color));

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!("{} [command] [args]", args[0]))
        .command(show_command)
        .command(toggle_command)
        .command(next_command)
        .command(prev_command)
        .command(move_command)
        .command(color_command);

    app.run(args);
}
