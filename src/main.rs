// ==========================================
// 采样排班看板 - 命令行入口
// ==========================================
// 用法:
//   collection-planner [--yes] [--config <path>] <command> <ano> <mes> <roster.json> <plan.json> [out.csv]
//
// 命令:
//   show           打印看板快照与计数
//   save           保存看板到远端
//   copy-previous  以上月计划替换看板 (需确认) 并保存
//   export <out>   导出月度网格 CSV
// ==========================================

use anyhow::{anyhow, bail, Context};
use collection_planner::api::PersistenceGateway;
use collection_planner::app::{ConsolePrompt, PlannerSession};
use collection_planner::config::{default_config_path, PlannerConfig};
use collection_planner::domain::period::Period;
use collection_planner::export::MonthGridExporter;
use collection_planner::importer::payload::read_file;
use collection_planner::{i18n, logging};
use std::path::PathBuf;

const USAGE: &str = "usage: collection-planner [--yes] [--config <path>] \
<show|save|copy-previous|export> <ano> <mes> <roster.json> <plan.json> [out.csv]";

struct CliArgs {
    assume_yes: bool,
    config_path: Option<PathBuf>,
    command: String,
    period: Period,
    roster_path: PathBuf,
    plan_path: PathBuf,
    extra: Vec<String>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut assume_yes = false;
    let mut config_path = None;
    let mut positional = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--yes" | "-y" => assume_yes = true,
            "--config" => {
                let path = args.next().ok_or_else(|| anyhow!("--config requires a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() < 5 {
        bail!(USAGE);
    }
    let mut positional = positional.into_iter();
    let command = positional.next().unwrap_or_default();
    let year: i32 = positional
        .next()
        .unwrap_or_default()
        .parse()
        .context("ano inválido")?;
    let month: u32 = positional
        .next()
        .unwrap_or_default()
        .parse()
        .context("mês inválido")?;
    let period = Period::new(year, month)
        .ok_or_else(|| anyhow!("período inválido: ano={}, mes={}", year, month))?;

    Ok(CliArgs {
        assume_yes,
        config_path,
        command,
        period,
        roster_path: PathBuf::from(positional.next().unwrap_or_default()),
        plan_path: PathBuf::from(positional.next().unwrap_or_default()),
        extra: positional.collect(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = parse_args()?;
    let config_path = cli.config_path.clone().or_else(default_config_path);
    let config = PlannerConfig::load(config_path.as_deref())?;
    i18n::set_locale(&config.locale);

    tracing::info!(
        "{} v{} - api={}, locale={}",
        collection_planner::APP_NAME,
        collection_planner::VERSION,
        config.api_base_url,
        config.locale
    );

    let roster_json = read_file(&cli.roster_path)?;
    // 计划文件缺失时以空看板开始
    let plan_json = read_file(&cli.plan_path).unwrap_or_else(|e| {
        tracing::warn!("计划文件读取失败,以空看板开始: {}", e);
        String::new()
    });

    let (mut session, report) =
        PlannerSession::from_inputs(cli.period, config.teams.clone(), &roster_json, &plan_json)?;
    tracing::info!("初始加载: placed={}, skipped={}", report.placed, report.skipped);

    let prompt = ConsolePrompt::new(cli.assume_yes);

    match cli.command.as_str() {
        "show" => print_board(&session),
        "save" => {
            let gateway = PersistenceGateway::http(&config)?;
            session.save(&gateway, &prompt).await?;
        }
        "copy-previous" => {
            let gateway = PersistenceGateway::http(&config)?;
            if session.copy_previous(&gateway, &prompt).await?.is_some() {
                print_board(&session);
                session.save(&gateway, &prompt).await?;
            }
        }
        "export" => {
            let out = cli
                .extra
                .first()
                .map(PathBuf::from)
                .ok_or_else(|| anyhow!("export requires an output path"))?;
            let rows = MonthGridExporter::write_file(
                session.board(),
                session.directory(),
                session.period(),
                &out,
            )?;
            println!("{} -> {} ({} rows)", session.period(), out.display(), rows);
        }
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }

    Ok(())
}

fn print_board(session: &PlannerSession) {
    let board = session.board();
    let directory = session.directory();
    println!("{} ({} allocations)", session.period(), board.len());

    for count in board.slot_counts().into_iter().filter(|c| c.count > 0) {
        let names: Vec<String> = board
            .allocations(&count.slot)
            .iter()
            .map(|a| {
                let name = directory.name(a.client_id).unwrap_or("?");
                if a.external_lab {
                    format!("★ {}", name)
                } else {
                    name.to_string()
                }
            })
            .collect();
        println!("  {} [{}] {}", count.slot, count.count, names.join("; "));
    }

    let view = session.view();
    let pending: Vec<&str> = directory
        .roster_sorted()
        .into_iter()
        .filter(|c| !view.status(c.id).is_scheduled())
        .map(|c| c.name.as_str())
        .collect();
    println!("pendentes: {}", pending.join(", "));
}
