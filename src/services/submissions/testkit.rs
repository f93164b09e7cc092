//! 流水线测试用的内存假实现

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::drive::DriveStore;
use crate::errors::{ArchiveError, Result};
use crate::models::drive::entities::{DriveItem, DriveUpload};
use crate::models::submissions::{
    entities::{Submission, SubmissionStatus},
    requests::{CreateSubmissionRequest, SubmissionListQuery, UpdateSubmissionRequest},
    responses::{SubmissionListResponse, SubmissionResponse},
};
use crate::models::PaginationInfo;
use crate::storage::{PublishRecord, Storage};
use crate::transient::TransientStore;

pub fn pending_submission(id: i64, status: SubmissionStatus) -> Submission {
    Submission {
        id,
        nama: "Budi".to_string(),
        nim: "5220411001".to_string(),
        judul: "Analisis: Jaringan (5G)!".to_string(),
        abstrak: "Ringkasan singkat.".to_string(),
        email: "budi@students.uty.ac.id".to_string(),
        file_url: "https://utfs.io/f/original".to_string(),
        file_key: Some("utfs-key-1".to_string()),
        file_name: Some("original.pdf".to_string()),
        status,
        download_link: None,
        drive_file_id: None,
        original_file_deleted: false,
        submitted_at: 1_700_000_000,
        published_at: None,
    }
}

/// 内存投稿表
pub struct FakeStorage {
    rows: Mutex<HashMap<i64, Submission>>,
}

impl FakeStorage {
    pub fn empty() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_submission(submission: Submission) -> Self {
        let store = Self::empty();
        store
            .rows
            .lock()
            .unwrap()
            .insert(submission.id, submission);
        store
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        let submission = Submission {
            id,
            nama: req.nama,
            nim: req.nim,
            judul: req.judul,
            abstrak: req.abstrak,
            email: req.email,
            file_url: req.file_url,
            file_key: req.file_key,
            file_name: req.file_name,
            status: SubmissionStatus::PendingCheck,
            download_link: None,
            drive_file_id: None,
            original_file_deleted: false,
            submitted_at: chrono::Utc::now().timestamp(),
            published_at: None,
        };
        rows.insert(id, submission.clone());
        Ok(submission)
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn list_submissions_with_pagination(
        &self,
        _query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let rows = self.rows.lock().unwrap();
        let mut items: Vec<Submission> = rows.values().cloned().collect();
        items.sort_by_key(|s| std::cmp::Reverse(s.submitted_at));
        let total = items.len() as i64;
        Ok(SubmissionListResponse {
            items: items.into_iter().map(SubmissionResponse::from).collect(),
            pagination: PaginationInfo {
                page: 1,
                page_size: total.max(1),
                total,
                total_pages: 1,
            },
        })
    }

    async fn update_submission_fields(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(submission) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(nama) = update.nama {
            submission.nama = nama;
        }
        if let Some(nim) = update.nim {
            submission.nim = nim;
        }
        if let Some(judul) = update.judul {
            submission.judul = judul;
        }
        if let Some(abstrak) = update.abstrak {
            submission.abstrak = abstrak;
        }
        Ok(Some(submission.clone()))
    }

    async fn update_submission_status(
        &self,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(submission) = rows.get_mut(&id) else {
            return Ok(None);
        };
        submission.status = status;
        Ok(Some(submission.clone()))
    }

    async fn mark_submission_published(
        &self,
        id: i64,
        record: PublishRecord,
    ) -> Result<Option<Submission>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(submission) = rows.get_mut(&id) else {
            return Ok(None);
        };
        submission.status = SubmissionStatus::Published;
        submission.download_link = Some(record.download_link);
        submission.drive_file_id = Some(record.drive_file_id);
        submission.original_file_deleted = record.original_file_deleted;
        submission.published_at = Some(record.published_at);
        Ok(Some(submission.clone()))
    }

    async fn delete_submission(&self, id: i64) -> Result<bool> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

/// 记录一次上传调用的内容
pub struct RecordedUpload {
    pub folder_id: String,
    pub file_name: String,
    pub content: Vec<u8>,
}

/// 内存云盘：记录上传与删除调用，可配置为失败
pub struct FakeDrive {
    uploads: Mutex<Vec<RecordedUpload>>,
    deleted: Mutex<Vec<String>>,
    upload_counter: AtomicU64,
    fail_upload: bool,
    fail_delete: bool,
}

impl FakeDrive {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            upload_counter: AtomicU64::new(0),
            fail_upload: false,
            fail_delete: false,
        }
    }

    pub fn failing_upload() -> Self {
        Self {
            fail_upload: true,
            ..Self::new()
        }
    }

    pub fn failing_delete() -> Self {
        Self {
            fail_delete: true,
            ..Self::new()
        }
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        std::mem::take(&mut *self.uploads.lock().unwrap())
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DriveStore for FakeDrive {
    async fn list_children(&self, _folder_id: &str) -> Result<Vec<DriveItem>> {
        Ok(Vec::new())
    }

    async fn list_subfolders(&self, _folder_id: &str) -> Result<Vec<DriveItem>> {
        Ok(Vec::new())
    }

    async fn create_file(
        &self,
        folder_id: &str,
        file_name: &str,
        _mime_type: &str,
        content: Vec<u8>,
    ) -> Result<DriveUpload> {
        if self.fail_upload {
            return Err(ArchiveError::drive_api("upload rejected"));
        }
        let n = self.upload_counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.uploads.lock().unwrap().push(RecordedUpload {
            folder_id: folder_id.to_string(),
            file_name: file_name.to_string(),
            content,
        });
        Ok(DriveUpload {
            id: format!("uploaded-{n}"),
            web_view_link: Some(format!("https://drive.example/uploaded-{n}")),
        })
    }

    async fn delete_file(&self, file_id: &str) -> Result<()> {
        if self.fail_delete {
            return Err(ArchiveError::drive_api("delete rejected"));
        }
        self.deleted.lock().unwrap().push(file_id.to_string());
        Ok(())
    }

    async fn download_file(&self, _file_id: &str) -> Result<Vec<u8>> {
        Err(ArchiveError::drive_api("not supported"))
    }
}

/// 内存临时存储
pub struct FakeTransient {
    content: Vec<u8>,
    deleted: Mutex<Vec<String>>,
    fail_delete: bool,
}

impl FakeTransient {
    pub fn serving(content: Vec<u8>) -> Self {
        Self {
            content,
            deleted: Mutex::new(Vec::new()),
            fail_delete: false,
        }
    }

    pub fn with_failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransientStore for FakeTransient {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(self.content.clone())
    }

    async fn delete(&self, file_key: &str) -> Result<()> {
        if self.fail_delete {
            return Err(ArchiveError::transient_store("delete rejected"));
        }
        self.deleted.lock().unwrap().push(file_key.to_string());
        Ok(())
    }
}
