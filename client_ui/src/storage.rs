use common_lib::app::TrackedApp;
use log::error;

/// Single localStorage key holding the serialized tracked-apps collection.
const STORAGE_KEY: &str = "appstore_reviews_viewer_apps";

/// Raw key-value store underneath the apps collection. Abstracted so tests
/// can substitute an in-memory double for browser localStorage.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, String>;
    fn write(&self, key: &str, value: &str) -> Result<(), String>;
}

/// Browser localStorage backend.
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage(&self) -> Result<web_sys::Storage, String> {
        web_sys::window()
            .ok_or_else(|| "`window` not found".to_owned())?
            .local_storage()
            .map_err(|e| format!("{e:?}"))?
            .ok_or_else(|| "local storage is disabled".to_owned())
    }
}

impl StorageBackend for BrowserStorage {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        self.storage()?.get_item(key).map_err(|e| format!("{e:?}"))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| format!("{e:?}"))
    }
}

/// Persistence adapter for the tracked-apps collection. All failure modes
/// (unreadable storage, malformed stored text, write failure) are logged and
/// absorbed; callers always get a usable value back.
pub struct AppsStorage<B> {
    backend: B,
}

impl<B: StorageBackend> AppsStorage<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn load(&self) -> Vec<TrackedApp> {
        match self.backend.read(STORAGE_KEY) {
            Ok(None) => Vec::new(),
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(apps) => apps,
                Err(e) => {
                    error!("can't decode stored apps: {e}");
                    Vec::new()
                }
            },
            Err(e) => {
                error!("can't read from local storage: {e}");
                Vec::new()
            }
        }
    }

    pub fn save(&self, apps: &[TrackedApp]) {
        match serde_json::to_string(apps) {
            Ok(text) => {
                if let Err(e) = self.backend.write(STORAGE_KEY, &text) {
                    error!("can't write to local storage: {e}");
                }
            }
            Err(e) => error!("can't encode apps: {e}"),
        }
    }

    /// Appends a record for `id` unless one already exists (idempotent).
    pub fn add(&self, id: &str) {
        let mut apps = self.load();
        if apps.iter().any(|app| app.id == id) {
            return;
        }
        apps.push(TrackedApp::new(id));
        self.save(&apps);
    }

    /// Removes every record matching `id`; the (possibly unchanged)
    /// collection is always re-saved.
    pub fn remove(&self, id: &str) {
        let mut apps = self.load();
        apps.retain(|app| app.id != id);
        self.save(&apps);
    }
}
