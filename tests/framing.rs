mod common;

use futures::{SinkExt, StreamExt};
use openprotocol::mids::{Mid0038, Mid9999};
use openprotocol::{Mid, OpenProtocolCodec};
use tokio_util::codec::Framed;

#[tokio::test]
async fn frames_survive_a_duplex_link() {
    common::init_tracing();
    let (integrator, controller) = tokio::io::duplex(256);
    let mut tx = Framed::new(integrator, OpenProtocolCodec);
    let mut rx = Framed::new(controller, OpenProtocolCodec);

    let keep_alive = Mid9999::new().pack().unwrap();
    let select_job = Mid0038::with_job_id(7, 2).unwrap().pack().unwrap();

    tx.send(keep_alive.clone()).await.unwrap();
    tx.send(select_job.clone()).await.unwrap();

    assert_eq!(rx.next().await.unwrap().unwrap(), keep_alive);
    assert_eq!(rx.next().await.unwrap().unwrap(), select_job);
}
