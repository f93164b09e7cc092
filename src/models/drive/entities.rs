//! 云盘目录扫描相关模型
//!
//! 扫描输出为扁平化的 `DriveFile` 列表，每个非目录节点恰好对应一条记录。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// 归档来源（云盘根目录对应的三个馆藏）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/drive.ts")]
pub enum Source {
    Materi,
    Jurnal,
    Peralatan,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Materi => "Materi",
            Source::Jurnal => "Jurnal",
            Source::Peralatan => "Peralatan",
        }
    }

    /// 缓存键，每个来源一个条目
    pub fn cache_key(&self) -> String {
        format!("catalog:{}", self.as_str().to_lowercase())
    }

    /// 文件类别兜底值：资料默认归为课程文件，其余归为通用
    pub fn default_category(&self) -> &'static str {
        match self {
            Source::Materi => "Mata Kuliah",
            _ => "Umum",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "materi" => Ok(Source::Materi),
            "jurnal" => Ok(Source::Jurnal),
            "peralatan" => Ok(Source::Peralatan),
            _ => Err(()),
        }
    }
}

/// 文件展示类型，在分类边界处由 MIME 类型收敛为封闭枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/drive.ts")]
pub enum FileKind {
    #[serde(rename = "PDF")]
    Pdf,
    Folder,
    Excel,
    Image,
    Link,
}

impl FileKind {
    /// 固定的 MIME 映射表
    ///
    /// Word / PPT 统一展示为 PDF（前端用同一查看器打开）。
    pub fn from_mime(mime: &str) -> Self {
        if mime.contains("pdf") {
            FileKind::Pdf
        } else if mime.contains("sheet") || mime.contains("excel") || mime.contains("csv") {
            FileKind::Excel
        } else if mime.contains("image") {
            FileKind::Image
        } else if mime.contains("folder") {
            FileKind::Folder
        } else if mime.contains("word")
            || mime.contains("document")
            || mime.contains("presentation")
            || mime.contains("powerpoint")
        {
            FileKind::Pdf
        } else {
            FileKind::Link
        }
    }
}

/// 扫描输出的分类文件记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/drive.ts")]
pub struct DriveFile {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub kind: FileKind,
    pub date: String,
    pub year: String,
    pub semester: String,
    pub category: String,
    pub subject: String,
    pub download_link: String,
    pub source: Source,
}

/// 云盘 API 返回的原始条目（files.list 的 fields 子集）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

impl DriveItem {
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(FOLDER_MIME)
    }
}

/// 云盘上传结果
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveUpload {
    pub id: String,
    #[serde(default)]
    pub web_view_link: Option<String>,
}
