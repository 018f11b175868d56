use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use client_core::ListQuery;
use crossbeam_channel::bounded;

use super::*;
use crate::test_support::{book, FakeCatalog, FakeSearch};

fn handler(catalog: Arc<FakeCatalog>) -> EffectHandler {
    EffectHandler::new(catalog, Arc::new(FakeSearch::default()))
}

#[test]
fn worker_reports_startup_then_answers_commands() {
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&wakes);
    let sink = EventSink::new(ui_tx).with_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let catalog = FakeCatalog::with_books(vec![book(1, "One", "A")]);

    let worker = launch(cmd_rx, sink, handler(catalog));

    let timeout = Duration::from_secs(5);
    assert_eq!(
        ui_rx.recv_timeout(timeout).expect("starting"),
        UiEvent::Info("Backend worker starting...".to_string())
    );
    assert_eq!(
        ui_rx.recv_timeout(timeout).expect("ready"),
        UiEvent::Info("Backend worker ready".to_string())
    );

    cmd_tx
        .send(BackendCommand::ListBooks {
            generation: 3,
            query: ListQuery::first_page(20),
        })
        .expect("queue command");

    match ui_rx.recv_timeout(timeout).expect("catalog") {
        UiEvent::CatalogLoaded { generation, page } => {
            assert_eq!(generation, 3);
            assert_eq!(page.books.len(), 1);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    drop(cmd_tx);
    worker.join().expect("worker exits once senders drop");
    assert!(wakes.load(Ordering::SeqCst) >= 2);
}

#[test]
fn closed_event_queue_does_not_wake() {
    let (ui_tx, ui_rx) = bounded(1);
    drop(ui_rx);
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&wakes);
    let sink = EventSink::new(ui_tx).with_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    sink.send(UiEvent::Info("ignored".to_string()));

    assert_eq!(wakes.load(Ordering::SeqCst), 0);
}
