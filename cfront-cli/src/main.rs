//! cfront CLI - lex, parse and check C-like source files.
//! cfront CLI - 对 C 风格源文件进行词法分析、语法分析和检查。

mod commands;
mod output;

use clap::{ArgAction, Args, Parser, Subcommand, value_parser};
use cfront_parser::ParseLimits;
use tracing::level_filters::LevelFilter;
use tracing::{debug, trace};
use tracing_subscriber::prelude::*;

/// Main CLI structure.
/// 主 CLI 结构体。
#[derive(Parser, Debug)]
#[command(name = "cfront")]
#[command(author, version, about = "cfront - lexer and error-tolerant parser for a C subset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    logging: LoggingArgs,

    /// Stop parsing after this many syntax errors. / 达到该错误数后停止解析。
    #[arg(long, global = true, default_value_t = ParseLimits::DEFAULT.max_errors)]
    max_errors: usize,

    /// Maximum nesting depth of the parser. / 解析器的最大嵌套深度。
    #[arg(long, global = true, default_value_t = ParseLimits::DEFAULT.max_depth)]
    max_depth: usize,
}

/// `-v`/`-q` counts mapped onto a log level.
#[derive(Args, Debug, Clone, Copy)]
struct LoggingArgs {
    /// More log output (-v, -vv, -vvv). / 更多日志输出。
    #[arg(short = 'v', global = true, value_parser = value_parser!(u8).range(0..=3), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Less log output (-q, -qq). / 更少日志输出。
    #[arg(short = 'q', global = true, value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    fn level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Available CLI commands.
/// 可用的 CLI 命令。
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream of a file. / 打印文件的词法单元流。
    Tokens {
        /// The file to lex, or `-` for stdin. / 要分析的文件，`-` 表示标准输入。
        file: String,

        /// Show the highlight category of every token. / 显示每个词法单元的高亮类别。
        #[arg(long)]
        categories: bool,
    },

    /// Print the parse tree of a file. / 打印文件的语法树。
    Parse {
        /// The file to parse, or `-` for stdin. / 要解析的文件，`-` 表示标准输入。
        file: String,
    },

    /// Report syntax errors in a file. / 报告文件中的语法错误。
    Check {
        /// The file to check, or `-` for stdin. / 要检查的文件，`-` 表示标准输入。
        file: String,

        /// One line per error instead of annotated snippets. / 每个错误一行，不显示代码片段。
        #[arg(long)]
        plain: bool,
    },
}

fn init_logging(level_filter: LevelFilter) {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(level_filter);

    // Only fails if a subscriber is already installed.
    let _ = tracing_subscriber::registry().with(layer).try_init();
}

/// Main entry point.
/// 主入口点。
fn main() {
    let cli = Cli::parse();
    init_logging(cli.logging.level_filter());
    trace!("starting cfront with args: {cli:?}");
    debug!("cfront version: {}", env!("CARGO_PKG_VERSION"));

    let limits = ParseLimits::DEFAULT
        .with_max_errors(cli.max_errors)
        .with_max_depth(cli.max_depth);

    let result = match cli.command {
        Commands::Tokens { file, categories } => commands::tokens::run(&file, categories),
        Commands::Parse { file } => commands::parse::run(&file, limits),
        Commands::Check { file, plain } => commands::check::run(&file, limits, plain),
    };

    if let Err(e) = result {
        output::error(&e);
        std::process::exit(1);
    }
}
