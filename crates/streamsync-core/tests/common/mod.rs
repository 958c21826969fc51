use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use streamsync_core::{
    ClientConnector, PlatformClient, PlatformError, PlatformSettings, StreamDescriptor,
};

pub const TEST_IMAGESTREAM: &str = "library-imagestream1";
pub const TEST_REPO: &str = "registry.example.com/library/imagestream1";

/// 記録された呼び出し（namespace の有無をそのまま保持）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get {
        name: String,
        namespace: Option<String>,
    },
    Create {
        name: String,
        repository: String,
        namespace: Option<String>,
    },
    Import {
        name: String,
        namespace: Option<String>,
    },
}

/// get_image_stream の振る舞い
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Lookup {
    Found,
    Missing,
    Fail(PlatformError),
}

/// 呼び出しを記録するフェイククライアント
pub struct RecordingPlatform {
    lookup: Lookup,
    create_error: Option<PlatformError>,
    import_error: Option<PlatformError>,
    calls: Mutex<Vec<Call>>,
}

#[allow(dead_code)]
impl RecordingPlatform {
    pub fn new(lookup: Lookup) -> Self {
        Self {
            lookup,
            create_error: None,
            import_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_create(mut self, error: PlatformError) -> Self {
        self.create_error = Some(error);
        self
    }

    pub fn failing_import(mut self, error: PlatformError) -> Self {
        self.import_error = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_gets(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Get { .. }))
            .count()
    }

    pub fn count_creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create { .. }))
            .count()
    }

    pub fn count_imports(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Import { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PlatformClient for RecordingPlatform {
    async fn get_image_stream(
        &self,
        name: &str,
        namespace: Option<&str>,
    ) -> Result<StreamDescriptor, PlatformError> {
        self.record(Call::Get {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
        });

        match &self.lookup {
            Lookup::Found => Ok(StreamDescriptor::new(name)
                .with_repository(TEST_REPO)
                .with_namespace(namespace)),
            Lookup::Missing => Err(PlatformError::response(404, "none")),
            Lookup::Fail(e) => Err(e.clone()),
        }
    }

    async fn create_image_stream(
        &self,
        name: &str,
        repository: &str,
        namespace: Option<&str>,
    ) -> Result<StreamDescriptor, PlatformError> {
        self.record(Call::Create {
            name: name.to_string(),
            repository: repository.to_string(),
            namespace: namespace.map(str::to_string),
        });

        match &self.create_error {
            Some(e) => Err(e.clone()),
            None => Ok(StreamDescriptor::new(name)
                .with_repository(repository)
                .with_namespace(namespace)),
        }
    }

    async fn import_image(&self, name: &str, namespace: Option<&str>) -> Result<(), PlatformError> {
        self.record(Call::Import {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
        });

        match &self.import_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

/// ランナーから同じフェイクを共有するためのラッパー
pub struct SharedPlatform(pub Arc<RecordingPlatform>);

#[async_trait]
impl PlatformClient for SharedPlatform {
    async fn get_image_stream(
        &self,
        name: &str,
        namespace: Option<&str>,
    ) -> Result<StreamDescriptor, PlatformError> {
        self.0.get_image_stream(name, namespace).await
    }

    async fn create_image_stream(
        &self,
        name: &str,
        repository: &str,
        namespace: Option<&str>,
    ) -> Result<StreamDescriptor, PlatformError> {
        self.0.create_image_stream(name, repository, namespace).await
    }

    async fn import_image(&self, name: &str, namespace: Option<&str>) -> Result<(), PlatformError> {
        self.0.import_image(name, namespace).await
    }
}

/// 接続設定を記録して共有フェイクを返すコネクタ
#[allow(dead_code)]
pub struct FakeConnector {
    pub platform: Arc<RecordingPlatform>,
    pub seen: Mutex<Vec<PlatformSettings>>,
}

#[allow(dead_code)]
impl FakeConnector {
    pub fn new(platform: RecordingPlatform) -> Self {
        Self {
            platform: Arc::new(platform),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn settings(&self) -> Vec<PlatformSettings> {
        self.seen.lock().unwrap().clone()
    }
}

impl ClientConnector for FakeConnector {
    fn connect(
        &self,
        settings: &PlatformSettings,
    ) -> Result<Box<dyn PlatformClient>, PlatformError> {
        self.seen.lock().unwrap().push(settings.clone());
        Ok(Box::new(SharedPlatform(Arc::clone(&self.platform))))
    }
}

#[allow(dead_code)]
pub fn build_json(namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => serde_json::json!({ "metadata": { "namespace": ns } }).to_string(),
        None => serde_json::json!({ "metadata": {} }).to_string(),
    }
}

/// 常に接続に失敗するコネクタ
#[allow(dead_code)]
pub struct FailingConnector {
    pub error: PlatformError,
    pub attempts: Mutex<usize>,
}

#[allow(dead_code)]
impl FailingConnector {
    pub fn new(error: PlatformError) -> Self {
        Self {
            error,
            attempts: Mutex::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl ClientConnector for FailingConnector {
    fn connect(
        &self,
        _settings: &PlatformSettings,
    ) -> Result<Box<dyn PlatformClient>, PlatformError> {
        *self.attempts.lock().unwrap() += 1;
        Err(self.error.clone())
    }
}
