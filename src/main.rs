use std::process;
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};
use subhunt::error::{Error, Result};
use subhunt::input::{read_lines, Opts, OutputFormat};
use subhunt::output::export_results;
use subhunt::{logger, EnumConfig, PassiveDiscovery, SubdomainEngine};

#[tokio::main]
async fn main() {
    let opts = Opts::parse();
    logger::init_logger(&opts.log_level, opts.silent);

    // 中断时丢弃正在执行的阶段，任务池里未完成的查询随之取消
    let outcome = tokio::select! {
        outcome = run(opts) => outcome,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, outstanding queries cancelled");
            process::exit(130);
        }
    };

    if let Err(e) = outcome {
        error!("{}", e);
        process::exit(1);
    }
}

async fn run(opts: Opts) -> Result<()> {
    let format = opts.format.parse::<OutputFormat>().unwrap_or_else(|e| {
        warn!("{}, falling back to txt", e);
        OutputFormat::Txt
    });

    if opts.passive {
        run_passive(&opts, format).await
    } else if opts.active {
        run_active(&opts, format).await
    } else if opts.working_resolver {
        run_working_resolver(&opts, format).await
    } else {
        Err(Error::MissingArgument(
            "one of --passive, --active or --working-resolver",
        ))
    }
}

fn base_config(opts: &Opts) -> EnumConfig {
    EnumConfig {
        domain: opts.domain.clone().unwrap_or_default(),
        levels: opts.levels,
        concurrency: opts.concurrency,
        query_timeout: Duration::from_secs(opts.timeout),
        ..Default::default()
    }
}

/// 被动收集，工具失败时不写输出文件
async fn run_passive(opts: &Opts, format: OutputFormat) -> Result<()> {
    if opts.domain.is_none() {
        return Err(Error::MissingArgument("--domain"));
    }
    let output = opts.output.as_deref().ok_or(Error::MissingArgument("--output"))?;

    let engine = SubdomainEngine::new(base_config(opts));
    let found = engine.run_passive(&PassiveDiscovery::default()).await?;

    export_results(&found, "subdomains", output, format)?;
    if found.is_empty() {
        info!("No subdomains found.");
    }
    Ok(())
}

/// 主动枚举：字典来自 --wordlist，或从 --list 的已知子域名中提取
async fn run_active(opts: &Opts, format: OutputFormat) -> Result<()> {
    if opts.domain.is_none() {
        return Err(Error::MissingArgument("--domain"));
    }
    let output = opts.output.as_deref().ok_or(Error::MissingArgument("--output"))?;

    let mut config = base_config(opts);
    if let Some(path) = &opts.resolver {
        config.resolvers = read_lines(path)?;
    }
    let engine = SubdomainEngine::new(config);

    let wordlist = match (&opts.list, &opts.wordlist) {
        (Some(list), _) => engine.wordlist_from_subdomains(&read_lines(list)?),
        (None, Some(wordlist)) => read_lines(wordlist)?,
        (None, None) => return Err(Error::MissingArgument("--list or --wordlist")),
    };

    let resolved = engine.run_active(wordlist).await;
    if resolved.is_empty() {
        info!("No subdomains could be resolved");
        return Ok(());
    }
    export_results(&resolved, "subdomains", output, format)
}

/// 检测 --list 中的DNS服务器
async fn run_working_resolver(opts: &Opts, format: OutputFormat) -> Result<()> {
    let list = opts.list.as_deref().ok_or(Error::MissingArgument("--list"))?;
    let output = opts.output.as_deref().ok_or(Error::MissingArgument("--output"))?;

    let candidates = read_lines(list)?;
    let engine = SubdomainEngine::new(base_config(opts));
    let working = engine.check_resolvers(candidates).await;

    export_results(&working, "resolvers", output, format)
}
