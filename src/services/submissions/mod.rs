pub mod approve;
pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod publish;
#[cfg(test)]
pub(crate) mod testkit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::drive::DriveStore;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, SubmissionListQuery, UpdateSubmissionRequest,
};
use crate::storage::Storage;
use crate::transient::TransientStore;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
    drive: Option<Arc<dyn DriveStore>>,
    transient: Option<Arc<dyn TransientStore>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            drive: None,
            transient: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_drive(&self, request: &HttpRequest) -> Arc<dyn DriveStore> {
        if let Some(drive) = &self.drive {
            drive.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn DriveStore>>>()
                .expect("Drive store not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_transient(&self, request: &HttpRequest) -> Arc<dyn TransientStore> {
        if let Some(transient) = &self.transient {
            transient.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn TransientStore>>>()
                .expect("Transient store not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 创建投稿
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, req).await
    }

    /// 获取投稿详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    /// 列出投稿
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, query).await
    }

    /// 审核编辑投稿字段
    pub async fn update_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        update: UpdateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_submission(self, request, submission_id, update).await
    }

    /// 审核通过（进入待发布状态）
    pub async fn approve_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        approve::approve_submission(self, request, submission_id).await
    }

    /// 发布流水线：水印、上云盘、清理临时文件、落库
    pub async fn publish_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        publish::publish_submission(self, request, submission_id).await
    }

    /// 删除流水线：尽力清理外部存储后删除记录
    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, submission_id).await
    }
}
