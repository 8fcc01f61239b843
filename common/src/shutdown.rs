use tokio::sync::watch;

pub type ShutdownSender = watch::Sender<bool>;
pub type ShutdownReceiver = watch::Receiver<bool>;

/// Kenh shutdown dung chung: gui true dung mot lan, moi receiver deu thay.
pub fn channel() -> (ShutdownSender, ShutdownReceiver) {
    watch::channel(false)
}

pub fn trigger(sender: &ShutdownSender) {
    let _ = sender.send(true);
}

/// Cho den khi co tin hieu shutdown; tra ve ngay neu da trigger truoc do.
pub async fn wait(mut receiver: ShutdownReceiver) {
    while !*receiver.borrow_and_update() {
        if receiver.changed().await.is_err() {
            break;
        }
    }
}
