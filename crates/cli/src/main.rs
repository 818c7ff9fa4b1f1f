use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use siteswap::api::{
    check_validity, generate, BuiltinToggles, CountBound, FilterList, GenerationParameters, Layout,
    NumberFilter, PatternFilter, Polarity, SearchCfg, Siteswap, ThrowMatcher,
};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod report;

use report::{write_report, Report};

#[derive(Parser)]
#[command(name = "siteswap")]
#[command(about = "Generate, filter and check juggling siteswaps")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Enumerate or sample siteswaps that pass the filters
    Generate(GenerateArgs),
    /// Check one sequence, e.g. `531` or `(6,2)(2,6)` with --sync
    Check {
        siteswap: String,
        /// Object count; derived from the throw average if omitted
        #[arg(long)]
        objects: Option<u32>,
        #[arg(long, default_value_t = 1)]
        jugglers: usize,
        #[arg(long)]
        sync: bool,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, default_value_t = 5)]
    period: usize,
    /// Total objects over all jugglers
    #[arg(long, default_value_t = 7)]
    objects: u32,
    #[arg(long, default_value_t = 2)]
    min: u32,
    #[arg(long, default_value_t = 10)]
    max: u32,
    #[arg(long, default_value_t = 2)]
    jugglers: usize,
    #[arg(long)]
    sync: bool,
    /// Sample random walks instead of enumerating
    #[arg(long)]
    random: bool,
    #[arg(long, default_value_t = 100)]
    max_results: usize,
    /// Seconds; 0 stops at the first checkpoint
    #[arg(long, default_value_t = 5)]
    timeout: u64,
    /// Allow zips (local 2s)
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    zips: bool,
    /// Allow zaps (local 1s)
    #[arg(long, action = ArgAction::Set, default_value_t = false)]
    zaps: bool,
    /// Allow holds (0s)
    #[arg(long, action = ArgAction::Set, default_value_t = false)]
    holds: bool,
    /// Reject patterns containing this height (repeatable)
    #[arg(long = "exclude", value_name = "HEIGHT")]
    exclude: Vec<u32>,
    /// Keep only patterns containing this height (repeatable)
    #[arg(long = "require", value_name = "HEIGHT")]
    require: Vec<u32>,
    /// Keep only patterns with this sub-sequence in one juggler's throws, e.g. "p s"
    #[arg(long = "include-pattern", value_name = "PATTERN")]
    include_pattern: Vec<String>,
    /// Reject patterns with this sub-sequence
    #[arg(long = "exclude-pattern", value_name = "PATTERN")]
    exclude_pattern: Vec<String>,
    /// Random mode seed (logged when drawn)
    #[arg(long)]
    seed: Option<u64>,
    /// Search steps between timeout/cancel checks
    #[arg(long)]
    check_interval: Option<u64>,
    /// Random mode: stop after this many draws without a new pattern
    #[arg(long)]
    stale_limit: Option<u64>,
    /// Print the JSON report instead of one pattern per line
    #[arg(long)]
    json: bool,
    /// Also write the JSON report to this file
    #[arg(long)]
    out: Option<PathBuf>,
}

impl GenerateArgs {
    fn params(&self) -> GenerationParameters {
        GenerationParameters {
            period_length: self.period,
            min_throw: self.min,
            max_throw: self.max,
            number_of_objects: self.objects,
            number_of_jugglers: self.jugglers,
            is_sync_pattern: self.sync,
            is_random_generation: self.random,
            max_results: self.max_results,
            timeout_seconds: self.timeout,
        }
    }

    fn toggles(&self) -> BuiltinToggles {
        BuiltinToggles {
            zips: self.zips,
            zaps: self.zaps,
            holds: self.holds,
        }
    }

    /// Built-ins first, then user filters; user filters equal to a built-in are not repeated.
    fn filters(&self, params: &GenerationParameters) -> Result<FilterList> {
        let layout = params.layout();
        let mut list = FilterList::new();
        list.reconcile(params, self.toggles());
        for &h in &self.exclude {
            list.add(NumberFilter::excluding_height(h, layout));
        }
        for &h in &self.require {
            list.add(NumberFilter::new(
                ThrowMatcher::Height(h),
                CountBound::AtLeast(1),
                Polarity::Include,
                layout,
            ));
        }
        let patterns = self
            .include_pattern
            .iter()
            .map(|p| (p, Polarity::Include))
            .chain(self.exclude_pattern.iter().map(|p| (p, Polarity::Exclude)));
        for (text, polarity) in patterns {
            let f = PatternFilter::parse(text, polarity, params.number_of_jugglers)
                .with_context(|| format!("parsing pattern `{text}`"))?;
            list.add(f);
        }
        Ok(list)
    }

    fn search_cfg(&self) -> SearchCfg {
        let defaults = SearchCfg::default();
        SearchCfg {
            check_interval: self.check_interval.unwrap_or(defaults.check_interval),
            stale_draw_limit: self.stale_limit.unwrap_or(defaults.stale_draw_limit),
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate(args) => run_generate(args),
        Action::Check {
            siteswap,
            objects,
            jugglers,
            sync,
        } => run_check(&siteswap, objects, jugglers, sync),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let params = args.params();
    let filters = args.filters(&params)?;
    for f in &filters {
        tracing::debug!(filter = %f, "active filter");
    }
    let out = generate(&params, &filters, args.search_cfg()).context("invalid parameters")?;
    let report = Report::new(&params, filters.iter().map(|f| f.to_string()).collect(), &out);
    if let Some(path) = &args.out {
        write_report(path, &report)?;
        tracing::info!(path = %path.display(), "report written");
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for s in &out.results {
            println!("{s}");
        }
    }
    Ok(())
}

fn run_check(text: &str, objects: Option<u32>, jugglers: usize, sync: bool) -> Result<()> {
    let layout = Layout::new(jugglers, sync);
    let s = Siteswap::parse_with(text, layout).with_context(|| format!("parsing `{text}`"))?;
    let objects = match objects {
        Some(n) => n,
        None => s
            .number_of_objects()
            .context("throw sum is not a multiple of the period")?,
    };
    if let Err(e) = check_validity(s.heights(), objects, layout) {
        bail!("{s} is not a valid {objects}-object siteswap: {e}");
    }
    println!("{s}: valid, {objects} objects, canonical {}", s.canonical());
    Ok(())
}
