// ==========================================
// 供应链风险感知 - 导入 Trait
// ==========================================
// 职责: 定义文件解析与快照加载接口（不包含实现）
// ==========================================

use crate::domain::input::InputSnapshot;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::RawRow;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 单个表文件 → 原始行
// 实现者: CsvParser, ExcelParser
pub trait FileParser {
    /// 解析文件为原始行（表头 → 文本）
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 已去除完全空白行
    /// - Err: 文件不存在、格式不支持、读取失败
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// SnapshotLoader Trait
// ==========================================
// 用途: 获取一次运行所需的六张输入表
// 实现者: DirectorySnapshotLoader
#[async_trait]
pub trait SnapshotLoader: Send + Sync {
    /// 加载完整输入快照
    ///
    /// 要么返回完整快照,要么返回错误,不返回部分表
    async fn load_snapshot(&self) -> ImportResult<InputSnapshot>;
}
