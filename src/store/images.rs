use super::Resource;
use crate::api::{ApiClient, ApiResult, UploadFile};
use crate::models::KosImage;
use tracing::info;

/// Photos of one of the owner's listings, with display URLs filled in
pub struct ImagesStore {
    client: ApiClient,
    kos_id: u64,
    state: Resource<Vec<KosImage>>,
}

impl ImagesStore {
    pub fn new(client: ApiClient, kos_id: u64) -> Self {
        Self {
            client,
            kos_id,
            state: Resource::default(),
        }
    }

    pub fn state(&self) -> &Resource<Vec<KosImage>> {
        &self.state
    }

    pub fn images(&self) -> &[KosImage] {
        &self.state.data
    }

    pub async fn refetch(&mut self) {
        if self.kos_id == 0 {
            return;
        }
        self.state.begin();
        let result = self.fetch().await;
        self.state.finish("images", result);
    }

    async fn fetch(&self) -> ApiResult<Vec<KosImage>> {
        let storage_url = &self.client.config().storage_url;
        let images = self.client.owner().list_images(self.kos_id).await?.into_data()?;
        Ok(images
            .into_iter()
            .map(|mut image| {
                if let Some(file) = &image.file {
                    image.image_url = Some(crate::api::normalize::image_url(storage_url, file));
                }
                image
            })
            .collect())
    }

    pub async fn upload(&mut self, upload: UploadFile) -> ApiResult<String> {
        let name = upload.file_name.clone();
        let message = self
            .client
            .owner()
            .upload_image(self.kos_id, upload)
            .await?
            .into_message();
        info!("Uploaded {} to listing {}", name, self.kos_id);
        self.refetch().await;
        Ok(message)
    }

    pub async fn replace(&mut self, id: u64, upload: UploadFile) -> ApiResult<String> {
        let message = self
            .client
            .owner()
            .update_image(id, upload)
            .await?
            .into_message();
        info!("Replaced image {}", id);
        self.refetch().await;
        Ok(message)
    }

    pub async fn delete(&mut self, id: u64) -> ApiResult<String> {
        let message = self.client.owner().delete_image(id).await?.into_message();
        info!("Deleted image {}", id);
        self.refetch().await;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use crate::store::fixtures::{client, done, gets, ok};
    use serde_json::json;

    #[tokio::test]
    async fn upload_refetches_with_urls() {
        let mock = MockTransport::new();
        mock.respond(200, done("uploaded"));
        mock.respond(200, ok(json!([{ "id": 3, "kos_id": 42, "file": "front.jpg" }])));
        let client = client(&mock);

        let mut store = ImagesStore::new(client.clone(), 42);
        store
            .upload(UploadFile::new("front.jpg", b"\x89PNG\r\n\x1A\n".to_vec()))
            .await
            .unwrap();

        assert_eq!(gets(&mock), 1);
        assert_eq!(
            store.images()[0].image_url.as_deref(),
            Some("https://learn.smktelkom-mlg.sch.id/kos/storage/front.jpg")
        );
        assert_eq!(
            mock.calls(&client.config().base_url),
            vec![
                (Method::Post, "/admin/upload_image/42".to_string()),
                (Method::Get, "/admin/show_image/42".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn replace_and_delete() {
        let mock = MockTransport::new();
        mock.respond(200, done("replaced"));
        mock.respond(200, ok(json!([{ "id": 3, "kos_id": 42, "file": "back.jpg" }])));
        mock.respond(200, done("deleted"));
        mock.respond(200, ok(json!([])));
        let client = client(&mock);

        let mut store = ImagesStore::new(client.clone(), 42);
        store.replace(3, UploadFile::new("back.jpg", vec![1, 2, 3])).await.unwrap();
        store.delete(3).await.unwrap();

        assert!(store.images().is_empty());
        let calls = mock.calls(&client.config().base_url);
        assert_eq!(calls[0], (Method::Post, "/admin/update_image/3".to_string()));
        assert_eq!(calls[2], (Method::Delete, "/admin/delete_image/3".to_string()));
    }
}
