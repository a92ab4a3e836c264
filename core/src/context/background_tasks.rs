use tokio::task::JoinHandle;

/// Long-lived helper tasks that outlive a single game
#[derive(Default)]
pub struct BackgroundTasks {
    pub audio: Option<JoinHandle<()>>,
    pub view: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.view.take() {
            handle.abort();
        }
        if let Some(handle) = self.audio.take() {
            handle.abort();
        }
    }
}
