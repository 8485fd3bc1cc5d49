// Browser sink: drives one hidden <audio> element.
use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, HtmlAudioElement};

use super::latch::GenerationLatch;
use crate::config::AudioSettings;
use crate::error::MediaError;
use crate::playback::{known_duration, EventListener, MediaEvent, MediaSink, SourceGeneration};

/// Initialize the audio element once.
pub fn get_or_create_audio_element(settings: &AudioSettings) -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(&settings.element_id) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(&settings.element_id);
    // Keep preload light so we stream instead of buffering entire files
    audio.set_attribute("preload", &settings.preload).ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

/// Shared between the sink and the element's event callbacks.
#[derive(Default)]
struct Notifier {
    generations: GenerationLatch,
    listener: RefCell<Option<EventListener>>,
}

impl Notifier {
    fn emit(&self, event: MediaEvent) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(event);
        }
    }
}

pub struct WebAudioSink {
    audio: Option<HtmlAudioElement>,
    notifier: Rc<Notifier>,
}

impl WebAudioSink {
    pub fn attach(settings: &AudioSettings) -> Self {
        let notifier = Rc::new(Notifier::default());
        let audio = get_or_create_audio_element(settings);
        match &audio {
            Some(audio) => {
                audio.set_volume(settings.volume);
                wire_listeners(audio, &notifier);
            }
            None => warn!(element_id = %settings.element_id, "no audio element available"),
        }
        Self { audio, notifier }
    }

    fn element(&self) -> Result<&HtmlAudioElement, MediaError> {
        self.audio.as_ref().ok_or(MediaError::Unavailable)
    }
}

impl MediaSink for WebAudioSink {
    fn load(&mut self, source_ref: &str, generation: SourceGeneration) -> Result<(), MediaError> {
        let audio = self.element()?;
        self.notifier.generations.request(generation);
        audio.set_src(source_ref);
        audio.load();
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let promise = self
            .element()?
            .play()
            .map_err(|err| MediaError::PlayRejected(describe_js_error(&err)))?;
        let notifier = self.notifier.clone();
        let generation = notifier.generations.requested();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                // Interrupted by a later pause() or load(), not a failure.
                if js_error_name(&err).as_deref() == Some("AbortError") {
                    return;
                }
                notifier.emit(MediaEvent::Failed {
                    generation,
                    error: MediaError::PlayRejected(describe_js_error(&err)),
                });
            }
        });
        Ok(())
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.element()?
            .pause()
            .map_err(|err| MediaError::Other(describe_js_error(&err)))
    }

    fn set_position(&mut self, seconds: f64) -> Result<(), MediaError> {
        self.element()?.set_current_time(seconds);
        Ok(())
    }

    fn subscribe(&mut self, listener: EventListener) {
        *self.notifier.listener.borrow_mut() = Some(listener);
    }
}

fn listen<F>(audio: &HtmlAudioElement, event: &str, handler: F)
where
    F: FnMut() + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    if let Err(err) = audio.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
    {
        warn!(event, error = %describe_js_error(&err), "failed to register audio listener");
    }
    callback.forget();
}

fn wire_listeners(audio: &HtmlAudioElement, notifier: &Rc<Notifier>) {
    // Events queued by the previous source still carry its generation until
    // the new one starts loading.
    {
        let notifier = notifier.clone();
        listen(audio, "loadstart", move || {
            notifier.generations.on_loadstart();
        });
    }

    for event in ["timeupdate", "durationchange", "loadedmetadata"] {
        let notifier = notifier.clone();
        let element = audio.clone();
        listen(audio, event, move || {
            notifier.emit(MediaEvent::TimeUpdate {
                generation: notifier.generations.stamp(),
                current_seconds: element.current_time(),
                duration_seconds: known_duration(element.duration()),
            });
        });
    }

    {
        let notifier = notifier.clone();
        listen(audio, "ended", move || {
            notifier.emit(MediaEvent::Ended {
                generation: notifier.generations.stamp(),
            });
        });
    }

    {
        let notifier = notifier.clone();
        let element = audio.clone();
        listen(audio, "error", move || {
            let error = element
                .error()
                .map(|err| MediaError::from_code(err.code(), None))
                .unwrap_or_else(|| MediaError::Other("unknown media error".to_string()));
            notifier.emit(MediaEvent::Failed {
                generation: notifier.generations.stamp(),
                error,
            });
        });
    }
}

fn js_error_name(err: &JsValue) -> Option<String> {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()?
        .as_string()
}

fn describe_js_error(err: &JsValue) -> String {
    let message = js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|value| value.as_string())
        .filter(|value| !value.is_empty());
    match (js_error_name(err), message) {
        (Some(name), Some(message)) => format!("{name}: {message}"),
        (Some(name), None) => name,
        (None, Some(message)) => message,
        (None, None) => err
            .as_string()
            .unwrap_or_else(|| "unknown error".to_string()),
    }
}
