// ==========================================
// 供应链风险感知 - 命令行入口
// ==========================================
// 用法:
//   supply-sensing <input_dir> [--db <path>] [--out <dir>] [--run-id <id>]
// 流程: 加载快照 → 读取评分策略 → 展开/汇总 → 落库 → (可选)导出CSV
// 运行摘要以 JSON 输出到 stdout
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use supply_sensing::config::ConfigManager;
use supply_sensing::db::{ensure_schema, open_sqlite_connection};
use supply_sensing::engine::{generate_run_id, SensingPipeline};
use supply_sensing::exporter::CsvExporter;
use supply_sensing::importer::{DirectorySnapshotLoader, SnapshotLoader};
use supply_sensing::perf::PerfGuard;
use supply_sensing::repository::{RecommendationRepository, RollupRepository};
use supply_sensing::logging;

/// 允许通过环境变量显式指定 DB 路径
const DB_PATH_ENV: &str = "SUPPLY_SENSING_DB_PATH";

#[derive(Debug)]
struct CliArgs {
    input_dir: PathBuf,
    db_path: String,
    out_dir: Option<PathBuf>,
    run_id: Option<String>,
}

fn usage() -> &'static str {
    "usage: supply-sensing <input_dir> [--db <path>] [--out <dir>] [--run-id <id>]"
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut input_dir = None;
    let mut db_path = None;
    let mut out_dir = None;
    let mut run_id = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" => db_path = Some(iter.next().ok_or_else(|| anyhow!("--db 缺少参数"))?),
            "--out" => {
                out_dir = Some(PathBuf::from(
                    iter.next().ok_or_else(|| anyhow!("--out 缺少参数"))?,
                ))
            }
            "--run-id" => {
                run_id = Some(iter.next().ok_or_else(|| anyhow!("--run-id 缺少参数"))?)
            }
            "-h" | "--help" => bail!("{}", usage()),
            other if other.starts_with("--") => bail!("未知参数: {}\n{}", other, usage()),
            other => {
                if input_dir.is_some() {
                    bail!("多余的位置参数: {}\n{}", other, usage());
                }
                input_dir = Some(PathBuf::from(other));
            }
        }
    }

    let input_dir = input_dir.ok_or_else(|| anyhow!("缺少输入目录\n{}", usage()))?;
    let db_path = match db_path {
        Some(p) => p,
        None => default_db_path()?,
    };

    Ok(CliArgs {
        input_dir,
        db_path,
        out_dir,
        run_id: run_id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    })
}

/// 默认数据库路径: 环境变量优先, 其次用户数据目录, 最后当前目录
fn default_db_path() -> Result<String> {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    let mut path = PathBuf::from("./supply_sensing.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("supply-sensing");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("无法创建数据目录: {}", dir.display()))?;
        path = dir.join("supply_sensing.db");
    }

    Ok(path.to_string_lossy().into_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args = parse_args(std::env::args().skip(1))?;
    tracing::info!("{} v{}", supply_sensing::APP_NAME, supply_sensing::VERSION);
    tracing::info!(input_dir = %args.input_dir.display(), db = %args.db_path, "开始运行");

    // ===== 1. 加载输入快照 =====
    let loader = DirectorySnapshotLoader::new(&args.input_dir);
    let snapshot = loader
        .load_snapshot()
        .await
        .with_context(|| format!("输入快照加载失败: {}", args.input_dir.display()))?;

    // ===== 2. 数据库与评分策略 =====
    let conn = open_sqlite_connection(&args.db_path)
        .with_context(|| format!("数据库打开失败: {}", args.db_path))?;
    ensure_schema(&conn).context("建表失败")?;
    let conn = Arc::new(Mutex::new(conn));

    let config = ConfigManager::from_connection(conn.clone())
        .map_err(|e| anyhow!("配置管理器初始化失败: {}", e))?;
    let policy = config
        .get_scoring_policy()
        .map_err(|e| anyhow!("评分策略读取失败: {}", e))?;

    // ===== 3. 展开评分 + 汇总 =====
    let run_id = args
        .run_id
        .clone()
        .unwrap_or_else(|| generate_run_id(chrono::Utc::now()));
    let result = {
        let _perf = PerfGuard::new("pipeline.run");
        SensingPipeline::new(policy).run(&run_id, &snapshot)
    };

    // ===== 4. 落库 =====
    {
        let _perf = PerfGuard::new("pipeline.persist");
        RecommendationRepository::from_connection(conn.clone())
            .batch_insert(&result.recommendations)
            .context("建议行落库失败")?;
        RollupRepository::from_connection(conn.clone())
            .batch_insert(&result.rollups)
            .context("汇总行落库失败")?;
    }

    // ===== 5. 导出 =====
    if let Some(out_dir) = &args.out_dir {
        let exporter = CsvExporter::new(out_dir)?;
        exporter.write_recommendations(&result.recommendations)?;
        exporter.write_rollups(&result.rollups)?;
    }

    println!("{}", serde_json::to_string_pretty(&result.summary())?);
    Ok(())
}
