//! 递归目录扫描器
//!
//! 从来源根目录出发，逐层下钻并把每个非目录节点分类为一条 `DriveFile`。
//! 同级条目并发展开；单个目录的列举失败只记录日志并跳过该子树，
//! 不会让整次扫描失败。

use futures_util::future::{BoxFuture, FutureExt, join_all};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::drive::DriveStore;
use crate::drive::classify::{self, WalkState};
use crate::models::drive::entities::{DriveFile, FileKind, Source};

/// 扫描一个来源的完整目录树
///
/// 根目录的直接子目录视为年份目录，年份目录之外的游离文件被忽略。
pub async fn scan_source(
    drive: &Arc<dyn DriveStore>,
    source: Source,
    root_folder_id: &str,
) -> Vec<DriveFile> {
    if root_folder_id.is_empty() {
        error!("Root folder id for {} is not configured", source);
        return Vec::new();
    }

    debug!("Starting scan for {} (root {})", source, root_folder_id);

    let years = match drive.list_subfolders(root_folder_id).await {
        Ok(folders) => folders,
        Err(e) => {
            error!("Failed to list year folders for {}: {}", source, e);
            return Vec::new();
        }
    };

    if years.is_empty() {
        warn!("No year folders found under {} root", source);
    }

    let walks = years.iter().map(|year| {
        let year_name = year.name.as_deref().unwrap_or(classify::DEFAULT_SUBJECT);
        walk_folder(drive, source, year.id.clone(), WalkState::for_year(year_name))
    });

    join_all(walks).await.into_iter().flatten().collect()
}

/// 展开单个目录，返回其子树内的全部文件记录
fn walk_folder<'a>(
    drive: &'a Arc<dyn DriveStore>,
    source: Source,
    folder_id: String,
    state: WalkState,
) -> BoxFuture<'a, Vec<DriveFile>> {
    async move {
        debug!(
            "Scanning folder {} | semester: {} | subject: {}",
            folder_id, state.semester, state.subject
        );

        let items = match drive.list_children(&folder_id).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to list folder {}: {}", folder_id, e);
                return Vec::new();
            }
        };

        let tasks = items.into_iter().map(|item| {
            let name = item
                .name
                .clone()
                .unwrap_or_else(|| classify::UNTITLED.to_string());

            if item.is_folder() {
                walk_folder(drive, source, item.id.clone(), state.descend(&name))
            } else {
                let record = DriveFile {
                    id: item.id.clone(),
                    title: name.clone(),
                    kind: item
                        .mime_type
                        .as_deref()
                        .map(FileKind::from_mime)
                        .unwrap_or(FileKind::Link),
                    date: classify::format_date_id(item.created_time.as_deref()),
                    year: state.year.clone(),
                    semester: state.semester.clone(),
                    category: classify::resolve_category(&name, &state.subject, source),
                    subject: state.subject.clone(),
                    download_link: item
                        .web_view_link
                        .clone()
                        .unwrap_or_else(|| "#".to_string()),
                    source,
                };
                async move { vec![record] }.boxed()
            }
        });

        join_all(tasks).await.into_iter().flatten().collect()
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ArchiveError, Result};
    use crate::models::drive::entities::{DriveItem, DriveUpload, FOLDER_MIME};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// 内存目录树，键为目录 ID，值为其子条目
    struct FakeDrive {
        tree: HashMap<String, Vec<DriveItem>>,
        broken: Vec<String>,
    }

    impl FakeDrive {
        fn new() -> Self {
            FakeDrive {
                tree: HashMap::new(),
                broken: Vec::new(),
            }
        }

        fn folder(&mut self, parent: &str, id: &str, name: &str) -> &mut Self {
            self.tree.entry(parent.to_string()).or_default().push(DriveItem {
                id: id.to_string(),
                name: Some(name.to_string()),
                mime_type: Some(FOLDER_MIME.to_string()),
                created_time: None,
                web_view_link: None,
            });
            self
        }

        fn file(&mut self, parent: &str, id: &str, name: &str, mime: &str) -> &mut Self {
            self.tree.entry(parent.to_string()).or_default().push(DriveItem {
                id: id.to_string(),
                name: Some(name.to_string()),
                mime_type: Some(mime.to_string()),
                created_time: Some("2024-03-01T10:00:00Z".to_string()),
                web_view_link: Some(format!("https://drive.example/{id}")),
            });
            self
        }
    }

    #[async_trait]
    impl DriveStore for FakeDrive {
        async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveItem>> {
            if self.broken.iter().any(|b| b == folder_id) {
                return Err(ArchiveError::drive_api("boom"));
            }
            Ok(self.tree.get(folder_id).cloned().unwrap_or_default())
        }

        async fn list_subfolders(&self, folder_id: &str) -> Result<Vec<DriveItem>> {
            Ok(self
                .list_children(folder_id)
                .await?
                .into_iter()
                .filter(|i| i.is_folder())
                .collect())
        }

        async fn create_file(
            &self,
            _folder_id: &str,
            _file_name: &str,
            _mime_type: &str,
            _content: Vec<u8>,
        ) -> Result<DriveUpload> {
            unimplemented!()
        }

        async fn delete_file(&self, _file_id: &str) -> Result<()> {
            unimplemented!()
        }

        async fn download_file(&self, _file_id: &str) -> Result<Vec<u8>> {
            unimplemented!()
        }
    }

    fn sample_tree() -> FakeDrive {
        let mut fake = FakeDrive::new();
        fake.folder("root", "y2023", "Angkatan 2023")
            .folder("y2023", "sem2", "II")
            .folder("sem2", "kalkulus", "Kalkulus")
            .file("kalkulus", "f1", "Modul 1.pdf", "application/pdf")
            .file("kalkulus", "f2", "UAS-Statistika.pdf", "application/pdf")
            .folder("y2023", "uts", "UTS")
            .file("uts", "f3", "Soal.docx", "application/vnd.ms-word")
            .file("y2023", "f4", "Pengumuman.png", "image/png");
        fake
    }

    #[tokio::test]
    async fn test_scan_classifies_by_level() {
        let drive: Arc<dyn DriveStore> = Arc::new(sample_tree());
        let mut files = scan_source(&drive, Source::Materi, "root").await;
        files.sort_by(|a, b| a.id.cmp(&b.id));

        // 每个非目录节点恰好一条记录
        assert_eq!(files.len(), 4);

        let modul = &files[0];
        assert_eq!(modul.year, "Angkatan 2023");
        assert_eq!(modul.semester, "II");
        assert_eq!(modul.subject, "Kalkulus");
        assert_eq!(modul.category, "Mata Kuliah");
        assert_eq!(modul.kind, FileKind::Pdf);
        assert_eq!(modul.date, "1 Mar 2024");

        // 文件名关键词压过学科默认值
        assert_eq!(files[1].category, "UAS");

        // UTS 目录不改变学科；类别只看文件名与学科名，这里落回来源默认值
        let soal = &files[2];
        assert_eq!(soal.subject, "Umum");
        assert_eq!(soal.category, "Mata Kuliah");
        assert_eq!(soal.semester, "Semua Semester");

        // 年份目录直下的游离文件
        let png = &files[3];
        assert_eq!(png.kind, FileKind::Image);
        assert_eq!(png.semester, "Semua Semester");
    }

    #[tokio::test]
    async fn test_broken_subtree_is_skipped() {
        let mut fake = sample_tree();
        fake.broken.push("sem2".to_string());
        let drive: Arc<dyn DriveStore> = Arc::new(fake);
        let mut files = scan_source(&drive, Source::Materi, "root").await;
        files.sort_by(|a, b| a.id.cmp(&b.id));

        // sem2 子树丢失，其余记录保留
        let ids: Vec<&str> = files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["f3", "f4"]);
    }

    #[tokio::test]
    async fn test_missing_root_returns_empty() {
        let drive: Arc<dyn DriveStore> = Arc::new(FakeDrive::new());
        assert!(scan_source(&drive, Source::Jurnal, "").await.is_empty());
        assert!(scan_source(&drive, Source::Jurnal, "nowhere").await.is_empty());
    }
}
