// ==========================================
// 供应链风险感知 - 目录快照加载器
// ==========================================
// 职责: 从目录中定位六张表文件,并发解析,映射为 InputSnapshot
// 规则: 单张表文件缺失视为空表并告警; 目录缺失为错误
// ==========================================

use crate::domain::input::InputSnapshot;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, RawRow};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::SnapshotLoader;
use async_trait::async_trait;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// 支持的表文件扩展名（按优先级）
const TABLE_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

// ==========================================
// TableKind - 六张输入表
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Events,
    Sites,
    Dependencies,
    Bom,
    Exposure,
    Inventory,
}

impl TableKind {
    pub const ALL: [TableKind; 6] = [
        TableKind::Events,
        TableKind::Sites,
        TableKind::Dependencies,
        TableKind::Bom,
        TableKind::Exposure,
        TableKind::Inventory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TableKind::Events => "events",
            TableKind::Sites => "sites",
            TableKind::Dependencies => "dependencies",
            TableKind::Bom => "bom",
            TableKind::Exposure => "exposure",
            TableKind::Inventory => "inventory",
        }
    }

    /// 可接受的文件名（不含扩展名）
    pub fn file_stems(&self) -> &'static [&'static str] {
        match self {
            TableKind::Events => &["events"],
            TableKind::Sites => &["sites"],
            TableKind::Dependencies => &["deps", "dependencies"],
            TableKind::Bom => &["bom", "products"],
            TableKind::Exposure => &["exposure"],
            TableKind::Inventory => &["inventory"],
        }
    }

    /// 在目录中定位表文件
    pub fn locate(&self, dir: &Path) -> Option<PathBuf> {
        self.file_stems().iter().find_map(|stem| {
            TABLE_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}.{}", stem, ext)))
                .find(|path| path.is_file())
        })
    }
}

// ==========================================
// DirectorySnapshotLoader - 目录快照加载器
// ==========================================
pub struct DirectorySnapshotLoader {
    dir: PathBuf,
    mapper: FieldMapper,
}

impl DirectorySnapshotLoader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            mapper: FieldMapper::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 同步加载（顺序读取六张表）
    pub fn load_blocking(&self) -> ImportResult<InputSnapshot> {
        self.check_dir()?;
        let tables = TableKind::ALL
            .iter()
            .map(|kind| read_table(&self.dir, *kind))
            .collect::<ImportResult<Vec<_>>>()?;
        Ok(self.assemble(tables))
    }

    fn check_dir(&self) -> ImportResult<()> {
        if !self.dir.is_dir() {
            return Err(ImportError::InputDirNotFound(self.dir.display().to_string()));
        }
        Ok(())
    }

    /// 原始表 → 强类型快照
    fn assemble(&self, tables: Vec<(TableKind, Vec<RawRow>)>) -> InputSnapshot {
        let mut snapshot = InputSnapshot::default();
        let m = &self.mapper;

        for (kind, rows) in tables {
            match kind {
                TableKind::Events => snapshot.events = rows.iter().map(|r| m.map_event(r)).collect(),
                TableKind::Sites => snapshot.sites = rows.iter().map(|r| m.map_site(r)).collect(),
                TableKind::Dependencies => {
                    snapshot.dependencies = rows.iter().map(|r| m.map_dependency(r)).collect()
                }
                TableKind::Bom => snapshot.bom = rows.iter().map(|r| m.map_bom(r)).collect(),
                TableKind::Exposure => {
                    snapshot.exposure = rows.iter().map(|r| m.map_exposure(r)).collect()
                }
                TableKind::Inventory => {
                    snapshot.inventory = rows.iter().map(|r| m.map_inventory(r)).collect()
                }
            }
        }

        for (table, size) in snapshot.table_sizes() {
            info!(table, rows = size, "table loaded");
        }
        snapshot
    }
}

#[async_trait]
impl SnapshotLoader for DirectorySnapshotLoader {
    /// 并发加载（每张表一个阻塞任务）
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn load_snapshot(&self) -> ImportResult<InputSnapshot> {
        self.check_dir()?;

        let tasks = TableKind::ALL.iter().map(|kind| {
            let dir = self.dir.clone();
            let kind = *kind;
            async move { tokio::task::spawn_blocking(move || read_table(&dir, kind)).await? }
        });

        let tables = try_join_all(tasks).await?;
        Ok(self.assemble(tables))
    }
}

/// 读取单张表（文件缺失视为空表）
fn read_table(dir: &Path, kind: TableKind) -> ImportResult<(TableKind, Vec<RawRow>)> {
    match kind.locate(dir) {
        Some(path) => {
            let rows = UniversalFileParser.parse(&path)?;
            Ok((kind, rows))
        }
        None => {
            warn!(
                table = kind.name(),
                dir = %dir.display(),
                "table file not found, treating as empty"
            );
            Ok((kind, Vec::new()))
        }
    }
}
