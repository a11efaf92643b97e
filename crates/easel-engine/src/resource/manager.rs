use std::any::Any;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::schedule::{Completer, Completion, Outcome};

use super::ResourceError;

/// Something loadable and storable in a [`ResourceManager`].
///
/// `load` runs on a worker thread, hence `Send`.
pub trait Resource: Any + Send {
    fn loaded(&self) -> bool;

    /// Loads the resource. A no-op for an already loaded resource.
    fn load(&mut self) -> Result<(), ResourceError>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A finished load on its way back from the worker.
struct Loaded {
    name: String,
    ticket: u64,
    resource: Box<dyn Resource>,
    result: Result<(), ResourceError>,
}

enum Slot {
    /// Out on a worker thread; `ticket` tells it apart from a later save
    /// under the same name.
    Loading { ticket: u64, completer: Completer },
    Ready(Box<dyn Resource>),
    /// The worker could not be started; the resource went with it.
    Lost,
}

struct Entry {
    slot: Slot,
    completion: Completion,
}

/// Name-keyed resource store. Names are never overwritten.
///
/// Loads run off the frame thread. [`poll`](Self::poll) hands finished
/// loads back and settles their completions; the frame driver calls it
/// once per tick.
pub struct ResourceManager {
    entries: HashMap<String, Entry>,
    tx: Sender<Loaded>,
    rx: Receiver<Loaded>,
    next_ticket: u64,
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceManager {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            entries: HashMap::new(),
            tx,
            rx,
            next_ticket: 0,
        }
    }

    /// Stores `resource` under `name` and starts loading it if needed.
    ///
    /// Returns `false` without storing when the name is taken. The load
    /// outcome arrives later through [`completion`](Self::completion); until
    /// then [`get`](Self::get) returns `None` for this name.
    pub fn save(&mut self, name: impl Into<String>, resource: impl Resource) -> bool {
        self.save_boxed(name, Box::new(resource))
    }

    pub fn save_boxed(&mut self, name: impl Into<String>, mut resource: Box<dyn Resource>) -> bool {
        let name = name.into();
        if self.entries.contains_key(&name) {
            log::debug!("resource {name:?} already saved, keeping the existing one");
            return false;
        }

        if resource.loaded() {
            log::debug!("resource {name:?} saved already loaded");
            let entry = Entry {
                slot: Slot::Ready(resource),
                completion: Completion::settled(Outcome::Succeeded),
            };
            self.entries.insert(name, entry);
            return true;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let (completer, completion) = Completion::pair();

        let tx = self.tx.clone();
        let job_name = name.clone();
        let spawned = thread::Builder::new()
            .name(format!("easel-load-{ticket}"))
            .spawn(move || {
                let result = resource.load();
                // The manager may be gone by now; nothing is waiting then.
                let _ = tx.send(Loaded { name: job_name, ticket, resource, result });
            });

        let slot = match spawned {
            Ok(_) => {
                log::debug!("loading resource {name:?}");
                Slot::Loading { ticket, completer }
            }
            Err(e) => {
                log::warn!("resource {name:?} could not start loading: {e}");
                completer.fail(format!("failed to spawn loader thread: {e}"));
                Slot::Lost
            }
        };
        self.entries.insert(name, Entry { slot, completion });
        true
    }

    /// Takes in every load finished since the last call and settles its
    /// completion. Never blocks. Returns how many loads were settled.
    pub fn poll(&mut self) -> usize {
        let mut settled = 0;
        while let Ok(loaded) = self.rx.try_recv() {
            if self.finish(loaded) {
                settled += 1;
            }
        }
        settled
    }

    fn finish(&mut self, loaded: Loaded) -> bool {
        let Loaded { name, ticket, resource, result } = loaded;
        let Some(entry) = self.entries.get_mut(&name) else {
            log::debug!("resource {name:?} finished loading after removal, dropping it");
            return false;
        };
        match &entry.slot {
            Slot::Loading { ticket: current, .. } if *current == ticket => {}
            _ => {
                log::debug!("resource {name:?} finished a superseded load, dropping it");
                return false;
            }
        }

        let outcome = match result {
            Ok(()) => {
                log::info!("loaded resource {name:?}");
                Outcome::Succeeded
            }
            Err(e) => {
                let reason = format!("{:#}", anyhow::Error::new(e));
                log::warn!("resource {name:?} failed to load: {reason}");
                Outcome::Failed(reason)
            }
        };
        if let Slot::Loading { completer, .. } = std::mem::replace(&mut entry.slot, Slot::Ready(resource)) {
            completer.settle(outcome);
        }
        true
    }

    /// Whether `name` is taken, loaded or not.
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether `name` is still out on a worker.
    pub fn is_loading(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|e| matches!(e.slot, Slot::Loading { .. }))
    }

    /// Loads not yet handed back by [`poll`](Self::poll).
    pub fn loading(&self) -> usize {
        self.entries
            .values()
            .filter(|e| matches!(e.slot, Slot::Loading { .. }))
            .count()
    }

    /// The stored resource. `None` while it is loading.
    pub fn get(&self, name: &str) -> Option<&dyn Resource> {
        match &self.entries.get(name)?.slot {
            Slot::Ready(resource) => Some(resource.as_ref()),
            Slot::Loading { .. } | Slot::Lost => None,
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Resource> {
        match &mut self.entries.get_mut(name)?.slot {
            Slot::Ready(resource) => Some(resource.as_mut()),
            Slot::Loading { .. } | Slot::Lost => None,
        }
    }

    /// Typed lookup. `None` when missing, loading or of another type.
    pub fn get_as<T: Resource>(&self, name: &str) -> Option<&T> {
        self.get(name)?.as_any().downcast_ref::<T>()
    }

    pub fn get_as_mut<T: Resource>(&mut self, name: &str) -> Option<&mut T> {
        self.get_mut(name)?.as_any_mut().downcast_mut::<T>()
    }

    /// The load outcome of `name`, usable with
    /// [`Waiter::settled`](crate::schedule::Waiter::settled).
    pub fn completion(&self, name: &str) -> Option<Completion> {
        self.entries.get(name).map(|e| e.completion.clone())
    }

    /// Forgets `name`. A load still in flight fails its completion now and
    /// is dropped when the worker finishes.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.entries.remove(name) {
            Some(entry) => {
                abandon(name, entry);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        for (name, entry) in self.entries.drain() {
            abandon(&name, entry);
        }
    }
}

fn abandon(name: &str, entry: Entry) {
    if let Slot::Loading { completer, .. } = entry.slot {
        log::debug!("resource {name:?} removed while loading");
        completer.fail("removed before it finished loading");
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::paint::ImageData;
    use crate::resource::ImageResource;

    fn png_bytes() -> Vec<u8> {
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([255, 0, 0, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    fn write_png(dir: &std::path::Path) -> std::path::PathBuf {
        let path = dir.join("dot.png");
        std::fs::write(&path, png_bytes()).unwrap();
        path
    }

    /// Polls until `name` settles or five seconds pass.
    fn settle(rm: &mut ResourceManager, name: &str) -> Completion {
        let completion = rm.completion(name).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while !completion.is_settled() && Instant::now() < deadline {
            rm.poll();
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(completion.is_settled(), "{name} never settled");
        completion
    }

    // ── save ──────────────────────────────────────────────────────────────

    #[test]
    fn save_loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path());
        let mut rm = ResourceManager::new();

        assert!(rm.save("dot", ImageResource::from_path(&path)));
        assert!(settle(&mut rm, "dot").succeeded());

        let image = rm.get_as::<ImageResource>("dot").and_then(|r| r.image()).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.texel(2, 1), Some([255, 0, 0, 255]));
        assert!(rm.get("dot").unwrap().loaded());
    }

    #[test]
    fn completion_stays_pending_until_polled() {
        let mut rm = ResourceManager::new();
        assert!(rm.save("dot", ImageResource::from_encoded("dot", png_bytes())));

        let completion = rm.completion("dot").unwrap();
        assert!(!completion.is_settled());
        assert!(rm.is_loading("dot"));
        assert_eq!(rm.loading(), 1);
        assert!(rm.has("dot"));
        assert!(rm.get("dot").is_none());

        // Finishing on the worker is not enough; only poll settles.
        std::thread::sleep(Duration::from_millis(50));
        assert!(!completion.is_settled());

        settle(&mut rm, "dot");
        assert!(completion.succeeded());
        assert!(!rm.is_loading("dot"));
        assert!(rm.get_as::<ImageResource>("dot").is_some());
    }

    #[test]
    fn loaded_resource_is_ready_at_once() {
        let mut rm = ResourceManager::new();
        assert!(rm.save("px", ImageResource::from_data(ImageData::filled(1, 1, [1, 2, 3, 4]))));
        assert!(rm.completion("px").unwrap().succeeded());
        assert_eq!(rm.loading(), 0);
        assert_eq!(rm.poll(), 0);
    }

    #[test]
    fn occupied_name_is_not_overwritten() {
        let mut rm = ResourceManager::new();
        assert!(rm.save("px", ImageResource::from_data(ImageData::filled(1, 1, [1, 2, 3, 4]))));
        assert!(!rm.save("px", ImageResource::from_data(ImageData::filled(2, 2, [0; 4]))));
        assert!(!rm.save("px", ImageResource::from_encoded("late", png_bytes())));
        let kept = rm.get_as::<ImageResource>("px").and_then(|r| r.image()).unwrap();
        assert_eq!(kept.width(), 1);
    }

    #[test]
    fn failed_load_settles_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut rm = ResourceManager::new();

        assert!(rm.save("missing", ImageResource::from_path(dir.path().join("nope.png"))));
        assert!(rm.save("garbage", ImageResource::from_encoded("garbage", vec![1, 2, 3])));

        for name in ["missing", "garbage"] {
            let completion = settle(&mut rm, name);
            assert!(!completion.succeeded());
            assert!(rm.has(name));
            assert!(!rm.get(name).unwrap().loaded());
        }
    }

    #[test]
    fn removal_while_loading_fails_the_completion() {
        let mut rm = ResourceManager::new();
        rm.save("dot", ImageResource::from_encoded("dot", png_bytes()));
        let completion = rm.completion("dot").unwrap();

        assert!(rm.remove("dot"));
        assert!(completion.is_settled());
        assert!(!completion.succeeded());

        // The late result is ignored, even under a reused name.
        rm.save("dot", ImageResource::from_data(ImageData::filled(5, 5, [0; 4])));
        std::thread::sleep(Duration::from_millis(50));
        rm.poll();
        let kept = rm.get_as::<ImageResource>("dot").and_then(|r| r.image()).unwrap();
        assert_eq!(kept.width(), 5);
    }

    // ── lookup ────────────────────────────────────────────────────────────

    #[test]
    fn get_missing_and_clear() {
        let mut rm = ResourceManager::new();
        assert!(rm.get("x").is_none());
        assert!(rm.completion("x").is_none());
        rm.save("x", ImageResource::from_data(ImageData::filled(1, 1, [0; 4])));
        assert_eq!(rm.len(), 1);
        rm.clear();
        assert!(rm.is_empty());
        assert!(!rm.has("x"));
    }
}
