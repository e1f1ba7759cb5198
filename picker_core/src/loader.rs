// picker_core/src/loader.rs

//! Asynchronous model loading.
//!
//! Decoding happens wherever the `EntityDecoder` puts it (an engine asset
//! task, a worker thread). Results only reach a `ModelRecord` through
//! `ModelLoader::poll_completions`, which the owner calls from the context
//! that renders state. The loader keeps a `Weak` back-reference to each
//! record, so a record dropped before its load finishes simply loses the
//! completion.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::thread;

use crate::error::PickerError;
use crate::model::ModelRecord;

// =========================================================================
// == Decoder Contract ==
// =========================================================================

/// The state of one decode, as reported by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodePoll<H> {
    Pending,
    Ready(H),
    Failed(String),
}

/// The 3D entity decoder collaborator.
pub trait EntityDecoder {
    /// Handle to a decoded, renderable entity.
    type Handle;
    /// Token identifying one decode started with `start`.
    type Ticket;

    /// Begins decoding `filename` off the calling context.
    fn start(&mut self, filename: &str) -> Self::Ticket;

    /// Checks on a decode. Once it returns `Ready` or `Failed` for a ticket
    /// the loader never polls that ticket again.
    fn poll(&mut self, ticket: &Self::Ticket) -> DecodePoll<Self::Handle>;
}

// =========================================================================
// == Model Loader ==
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadRequest {
    Started,
    /// The record already has a load in flight or finished.
    AlreadyRequested,
}

/// What happened to one load, reported once when it completes.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadCompletion {
    Loaded { identifier: String },
    Failed(PickerError),
    /// The record was dropped before the load finished.
    Discarded { identifier: String },
}

struct PendingLoad<T, H> {
    identifier: String,
    record: Weak<ModelRecord<H>>,
    ticket: T,
}

/// Tracks in-flight loads and delivers their results to the records.
pub struct ModelLoader<T, H> {
    extension: String,
    pending: Vec<PendingLoad<T, H>>,
}

impl<T, H> ModelLoader<T, H> {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            pending: Vec::new(),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// The file the decoder is asked for, e.g. `teapot.glb`.
    pub fn filename_for(&self, identifier: &str) -> String {
        format!("{}.{}", identifier, self.extension)
    }

    /// Starts the single load for `record`.
    pub fn request<D>(&mut self, record: &Arc<ModelRecord<H>>, decoder: &mut D) -> LoadRequest
    where
        D: EntityDecoder<Ticket = T, Handle = H>,
    {
        if !record.claim_load() {
            tracing::debug!(
                "Load for '{}' already requested, ignoring.",
                record.identifier()
            );
            return LoadRequest::AlreadyRequested;
        }

        let filename = self.filename_for(record.identifier());
        tracing::debug!("Starting load of '{}'.", filename);
        let ticket = decoder.start(&filename);
        self.pending.push(PendingLoad {
            identifier: record.identifier().to_string(),
            record: Arc::downgrade(record),
            ticket,
        });
        LoadRequest::Started
    }

    /// Requests a load for every record in `records`.
    pub fn request_all<'a, D, I>(&mut self, records: I, decoder: &mut D) -> usize
    where
        D: EntityDecoder<Ticket = T, Handle = H>,
        I: IntoIterator<Item = &'a Arc<ModelRecord<H>>>,
        H: 'a,
    {
        records
            .into_iter()
            .filter(|record| self.request(record, decoder) == LoadRequest::Started)
            .count()
    }

    /// Polls every in-flight load and writes finished results into their
    /// records. Each load is reported exactly once.
    pub fn poll_completions<D>(&mut self, decoder: &mut D) -> Vec<LoadCompletion>
    where
        D: EntityDecoder<Ticket = T, Handle = H>,
    {
        let mut completions = Vec::new();

        self.pending.retain(|load| {
            let result = match decoder.poll(&load.ticket) {
                DecodePoll::Pending => return true,
                DecodePoll::Ready(handle) => Ok(handle),
                DecodePoll::Failed(reason) => Err(reason),
            };

            let Some(record) = load.record.upgrade() else {
                tracing::debug!(
                    "Model '{}' was discarded before its load completed.",
                    load.identifier
                );
                completions.push(LoadCompletion::Discarded {
                    identifier: load.identifier.clone(),
                });
                return false;
            };

            match result {
                Ok(handle) => {
                    record.set_entity_handle(handle);
                    tracing::info!("Successfully loaded entity for model '{}'.", load.identifier);
                    completions.push(LoadCompletion::Loaded {
                        identifier: load.identifier.clone(),
                    });
                }
                Err(reason) => {
                    let error = PickerError::AssetLoadFailed {
                        identifier: load.identifier.clone(),
                        reason: reason.clone(),
                    };
                    tracing::warn!("{}", error);
                    record.mark_failed(reason);
                    completions.push(LoadCompletion::Failed(error));
                }
            }
            false
        });

        completions
    }
}

// =========================================================================
// == Threaded Decoder ==
// =========================================================================

type DecodeFn<H> = dyn Fn(&str) -> Result<H, String> + Send + Sync;

/// An `EntityDecoder` that runs a decode function on its own thread per
/// request and hands results back through a channel.
///
/// Meant for tests and engine-less tools such as catalog checks: it spawns
/// one unpooled OS thread per request. The Bevy app decodes through the
/// `AssetServer` task pool instead.
pub struct ThreadedDecoder<H> {
    decode: Arc<DecodeFn<H>>,
    next_ticket: u64,
    sender: Sender<(u64, Result<H, String>)>,
    receiver: Receiver<(u64, Result<H, String>)>,
    finished: HashMap<u64, Result<H, String>>,
}

impl<H: Send + 'static> ThreadedDecoder<H> {
    pub fn new<F>(decode: F) -> Self
    where
        F: Fn(&str) -> Result<H, String> + Send + Sync + 'static,
    {
        let (sender, receiver) = unbounded();
        Self {
            decode: Arc::new(decode),
            next_ticket: 0,
            sender,
            receiver,
            finished: HashMap::new(),
        }
    }
}

impl<H: Send + 'static> EntityDecoder for ThreadedDecoder<H> {
    type Handle = H;
    type Ticket = u64;

    fn start(&mut self, filename: &str) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let decode = Arc::clone(&self.decode);
        let sender = self.sender.clone();
        let filename = filename.to_string();
        thread::spawn(move || {
            // The receiver lives as long as the decoder; a send error only
            // means nobody is waiting any more.
            let _ = sender.send((ticket, decode(&filename)));
        });
        ticket
    }

    fn poll(&mut self, ticket: &u64) -> DecodePoll<H> {
        for (done, result) in self.receiver.try_iter() {
            self.finished.insert(done, result);
        }
        match self.finished.remove(ticket) {
            None => DecodePoll::Pending,
            Some(Ok(handle)) => DecodePoll::Ready(handle),
            Some(Err(reason)) => DecodePoll::Failed(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LoadStatus, Thumbnail};
    use std::time::{Duration, Instant};

    /// A decoder whose results the test hands out by filename.
    #[derive(Default)]
    struct ScriptedDecoder {
        started: Vec<String>,
        results: HashMap<String, DecodePoll<u32>>,
    }

    impl ScriptedDecoder {
        fn finish(&mut self, filename: &str, result: DecodePoll<u32>) {
            self.results.insert(filename.to_string(), result);
        }
    }

    impl EntityDecoder for ScriptedDecoder {
        type Handle = u32;
        type Ticket = String;

        fn start(&mut self, filename: &str) -> String {
            self.started.push(filename.to_string());
            filename.to_string()
        }

        fn poll(&mut self, ticket: &String) -> DecodePoll<u32> {
            self.results
                .remove(ticket)
                .unwrap_or(DecodePoll::Pending)
        }
    }

    fn record(name: &str) -> Arc<ModelRecord<u32>> {
        Arc::new(ModelRecord::new(
            name,
            Thumbnail {
                image_name: name.to_string(),
                is_fallback: false,
            },
        ))
    }

    #[test]
    fn success_populates_the_record_once() {
        let mut decoder = ScriptedDecoder::default();
        let mut loader = ModelLoader::new("glb");
        let teapot = record("teapot");

        assert_eq!(loader.request(&teapot, &mut decoder), LoadRequest::Started);
        assert_eq!(decoder.started, vec!["teapot.glb"]);
        assert!(loader.poll_completions(&mut decoder).is_empty());
        assert_eq!(teapot.load_status(), LoadStatus::Pending);

        decoder.finish("teapot.glb", DecodePoll::Ready(42));
        let completions = loader.poll_completions(&mut decoder);
        assert_eq!(
            completions,
            vec![LoadCompletion::Loaded {
                identifier: "teapot".to_string()
            }]
        );
        assert_eq!(teapot.entity_handle(), Some(&42));
        assert_eq!(loader.in_flight(), 0);
        assert!(loader.poll_completions(&mut decoder).is_empty());
    }

    #[test]
    fn failure_leaves_the_handle_empty() {
        let mut decoder = ScriptedDecoder::default();
        let mut loader = ModelLoader::new("glb");
        let biplane = record("toy_biplane");

        loader.request(&biplane, &mut decoder);
        decoder.finish("toy_biplane.glb", DecodePoll::Failed("bad header".to_string()));

        let completions = loader.poll_completions(&mut decoder);
        assert!(matches!(
            &completions[..],
            [LoadCompletion::Failed(PickerError::AssetLoadFailed { identifier, .. })]
                if identifier == "toy_biplane"
        ));
        assert!(biplane.entity_handle().is_none());
        assert_eq!(biplane.load_status(), LoadStatus::Failed);
    }

    #[test]
    fn second_request_is_refused() {
        let mut decoder = ScriptedDecoder::default();
        let mut loader = ModelLoader::new("glb");
        let teapot = record("teapot");

        assert_eq!(loader.request(&teapot, &mut decoder), LoadRequest::Started);
        assert_eq!(
            loader.request(&teapot, &mut decoder),
            LoadRequest::AlreadyRequested
        );
        assert_eq!(decoder.started.len(), 1);
        assert_eq!(loader.in_flight(), 1);
    }

    #[test]
    fn discarded_record_drops_the_completion() {
        let mut decoder = ScriptedDecoder::default();
        let mut loader = ModelLoader::new("glb");
        let teapot = record("teapot");

        loader.request(&teapot, &mut decoder);
        drop(teapot);
        decoder.finish("teapot.glb", DecodePoll::Ready(1));

        assert_eq!(
            loader.poll_completions(&mut decoder),
            vec![LoadCompletion::Discarded {
                identifier: "teapot".to_string()
            }]
        );
        assert_eq!(loader.in_flight(), 0);
    }

    #[test]
    fn request_all_starts_each_record_once() {
        let mut decoder = ScriptedDecoder::default();
        let mut loader = ModelLoader::new("usdz");
        let records = vec![record("teapot"), record("toy_robot_vintage")];

        assert_eq!(loader.request_all(&records, &mut decoder), 2);
        assert_eq!(loader.request_all(&records, &mut decoder), 0);
        assert_eq!(
            decoder.started,
            vec!["teapot.usdz", "toy_robot_vintage.usdz"]
        );
    }

    #[test]
    fn threaded_decoder_delivers_from_background_thread() {
        let caller = thread::current().id();
        let mut decoder = ThreadedDecoder::new(move |filename: &str| {
            assert_ne!(thread::current().id(), caller);
            if filename.starts_with("broken") {
                Err("corrupt file".to_string())
            } else {
                Ok(filename.len())
            }
        });
        let mut loader = ModelLoader::new("glb");
        let good = Arc::new(ModelRecord::new(
            "teapot",
            Thumbnail {
                image_name: "teapot".to_string(),
                is_fallback: false,
            },
        ));
        let bad = Arc::new(ModelRecord::new(
            "broken",
            Thumbnail {
                image_name: "teapot".to_string(),
                is_fallback: true,
            },
        ));
        loader.request(&good, &mut decoder);
        loader.request(&bad, &mut decoder);

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut completions = Vec::new();
        while loader.in_flight() > 0 && Instant::now() < deadline {
            completions.extend(loader.poll_completions(&mut decoder));
            thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(completions.len(), 2);
        assert_eq!(good.entity_handle(), Some(&"teapot.glb".len()));
        assert_eq!(bad.load_status(), LoadStatus::Failed);
    }
}
