//! End to end exchanges against a scripted in-process device.
//!
//! Each test binds a loopback listener, plays the device side of the
//! conversation over the real codec, and asserts on what the client layer
//! makes of it: session adoption, request numbering, pagination, and the
//! claim/data stream pairing.

use bytes::Bytes;
use dvrip_core::client::DvripClient;
use dvrip_core::dvrip::codec::PacketCodec;
use dvrip_core::dvrip::message::Session;
use dvrip_core::dvrip::model::*;
use dvrip_core::dvrip::monitor::StreamKind;
use dvrip_core::dvrip::files::{FileKind, FileQuery};
use dvrip_core::dvrip::convert::{DvrTime, EPOCH};
use dvrip_core::{DecodeError, Error};
use env_logger::Env;
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::Framed;

type Device = Framed<TcpStream, PacketCodec>;

fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
}

async fn accept(listener: &TcpListener) -> Device {
    let (stream, _) = listener.accept().await.unwrap();
    Framed::new(stream, PacketCodec)
}

/// Reads one single-fragment control packet and parses its JSON body.
async fn read_request(device: &mut Device) -> (Packet, Value) {
    let packet = device.next().await.unwrap().unwrap();
    let body = serde_json::from_slice(&packet.payload).unwrap();
    (packet, body)
}

async fn send_reply(device: &mut Device, session: u32, number: u32, ty: u16, body: &Value) {
    let payload = Bytes::from(serde_json::to_vec(body).unwrap());
    device
        .send(Packet::control(session, number, ty, payload, 0, 0))
        .await
        .unwrap();
}

fn login_reply_body(session: &str, interval: u32) -> Value {
    json!({
        "AliveInterval": interval,
        "ChannelNum": 4,
        "DataUseAES": false,
        "DeviceType ": "HVR",
        "ExtraChannel": 0,
        "Ret": 100,
        "SessionID": session,
    })
}

/// Plays the device side of a login under the given session, fragmenting
/// the reply in two when asked to.
async fn serve_login(device: &mut Device, session: u32, interval: u32, fragmented: bool) {
    let (packet, body) = read_request(device).await;
    assert_eq!(packet.ty, MSG_ID_LOGIN);
    assert_eq!(packet.session, 0);
    assert_eq!(packet.number, 0);
    assert_eq!(body["UserName"], "admin");
    assert_eq!(body["PassWord"], "tlJwpbo6");
    assert_eq!(body["EncryptType"], "MD5");
    assert_eq!(body["LoginType"], "DVRIP-Web");

    let reply = login_reply_body(&format!("0x{:08X}", session), interval);
    if fragmented {
        let encoded = serde_json::to_vec(&reply).unwrap();
        let (head, tail) = encoded.split_at(encoded.len() / 2);
        for (index, part) in [head, tail].iter().enumerate() {
            device
                .send(Packet::control(
                    session,
                    packet.number,
                    MSG_ID_LOGIN_REPLY,
                    Bytes::copy_from_slice(part),
                    2,
                    index as u8,
                ))
                .await
                .unwrap();
        }
    } else {
        send_reply(device, session, packet.number, MSG_ID_LOGIN_REPLY, &reply).await;
    }
}

#[tokio::test]
async fn test_session_lifecycle() {
    init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let device = tokio::spawn(async move {
        let mut device = accept(&listener).await;
        serve_login(&mut device, 0x57, 21, true).await;

        // The keep alive interval has not lapsed, so the next packet must
        // already be the logout, under the adopted session and the next
        // even request number.
        let (packet, body) = read_request(&mut device).await;
        assert_eq!(packet.ty, MSG_ID_LOGOUT);
        assert_eq!(packet.session, 0x57);
        assert_eq!(packet.number, 2);
        assert_eq!(body["Name"], "admin");
        assert_eq!(body["SessionID"], "0x00000057");
        send_reply(
            &mut device,
            0x57,
            packet.number,
            MSG_ID_LOGOUT_REPLY,
            &json!({ "Ret": 100, "Name": "admin", "SessionID": "0x00000057" }),
        )
        .await;
    });

    let mut client = DvripClient::connect(addr).await.unwrap();
    let reply = client.login("admin", "").await.unwrap();
    assert_eq!(reply.timeout, 21);
    assert_eq!(reply.channels, 4);
    assert_eq!(client.session(), Session(0x57));
    assert_eq!(client.chassis(), Some("HVR"));

    // Quiet no-op while the interval has not lapsed.
    client.keepalive().await.unwrap();

    client.logout().await.unwrap();
    assert_eq!(client.session(), Session::NONE);
    device.await.unwrap();
}

#[tokio::test]
async fn test_keepalive_fires_after_interval() {
    init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let device = tokio::spawn(async move {
        let mut device = accept(&listener).await;
        // A zero interval means every keep alive is due.
        serve_login(&mut device, 0x42, 0, false).await;

        let (packet, body) = read_request(&mut device).await;
        assert_eq!(packet.ty, MSG_ID_KEEPALIVE);
        assert_eq!(packet.number, 2);
        assert_eq!(body["Name"], "KeepAlive");
        assert_eq!(body["SessionID"], "0x00000042");
        send_reply(
            &mut device,
            0x42,
            packet.number,
            MSG_ID_KEEPALIVE_REPLY,
            &json!({ "Ret": 100, "Name": "KeepAlive", "SessionID": "0x00000042" }),
        )
        .await;
    });

    let mut client = DvripClient::connect(addr).await.unwrap();
    client.login("admin", "").await.unwrap();
    client.keepalive().await.unwrap();
    device.await.unwrap();
}

fn file_entry(name: &str, start: &str) -> Value {
    json!({
        "FileName": name,
        "DiskNo": 0,
        "SerialNo": 0,
        "FileLength": "0x00000400",
        "BeginTime": start,
        "EndTime": "2019-07-30 23:59:59",
    })
}

#[tokio::test]
async fn test_file_search_pagination() {
    init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let first = file_entry("/idea0/a.h264", "2019-07-30 20:00:00");
    let second = file_entry("/idea0/b.h264", "2019-07-30 21:00:00");
    let third = file_entry("/idea0/c.h264", "2019-07-30 22:00:00");

    let pages = (first.clone(), second.clone(), third.clone());
    let device = tokio::spawn(async move {
        let (first, second, third) = pages;
        let mut device = accept(&listener).await;
        serve_login(&mut device, 0x57, 21, false).await;

        // Page one: partial results.
        let (packet, body) = read_request(&mut device).await;
        assert_eq!(packet.ty, MSG_ID_GET_FILES);
        assert_eq!(body["OPFileQuery"]["BeginTime"], "2000-00-00 00:00:00");
        send_reply(
            &mut device,
            0x57,
            packet.number,
            MSG_ID_GET_FILES_REPLY,
            &json!({
                "Ret": 111,
                "Name": "OPFileQuery",
                "SessionID": "0x00000057",
                "OPFileQuery": [first, second.clone()],
            }),
        )
        .await;

        // Page two resumes from the last entry's start time and echoes it.
        let (packet, body) = read_request(&mut device).await;
        assert_eq!(body["OPFileQuery"]["BeginTime"], "2019-07-30 21:00:00");
        send_reply(
            &mut device,
            0x57,
            packet.number,
            MSG_ID_GET_FILES_REPLY,
            &json!({
                "Ret": 110,
                "Name": "OPFileQuery",
                "SessionID": "0x00000057",
                "OPFileQuery": [second, third],
            }),
        )
        .await;
    });

    let mut client = DvripClient::connect(addr).await.unwrap();
    client.login("admin", "").await.unwrap();
    let files = client
        .files(FileQuery {
            start: DvrTime(Some(EPOCH)),
            end: DvrTime(None),
            channel: 0,
            event: Default::default(),
            kind: FileKind::Video,
        })
        .await
        .unwrap();

    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["/idea0/a.h264", "/idea0/b.h264", "/idea0/c.h264"]);
    device.await.unwrap();
}

#[tokio::test]
async fn test_file_search_stops_on_repeated_tail() {
    init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let first = file_entry("/idea0/a.h264", "2019-07-30 20:00:00");
    let second = file_entry("/idea0/b.h264", "2019-07-30 21:00:00");

    let pages = (first.clone(), second.clone());
    let device = tokio::spawn(async move {
        let (first, second) = pages;
        let mut device = accept(&listener).await;
        serve_login(&mut device, 0x57, 21, false).await;

        let (packet, _) = read_request(&mut device).await;
        send_reply(
            &mut device,
            0x57,
            packet.number,
            MSG_ID_GET_FILES_REPLY,
            &json!({
                "Ret": 111,
                "Name": "OPFileQuery",
                "SessionID": "0x00000057",
                "OPFileQuery": [first, second.clone()],
            }),
        )
        .await;

        // A device that has nothing further repeats the tail entry; the
        // pager must not loop on it.
        let (packet, _) = read_request(&mut device).await;
        send_reply(
            &mut device,
            0x57,
            packet.number,
            MSG_ID_GET_FILES_REPLY,
            &json!({
                "Ret": 111,
                "Name": "OPFileQuery",
                "SessionID": "0x00000057",
                "OPFileQuery": [second],
            }),
        )
        .await;
    });

    let mut client = DvripClient::connect(addr).await.unwrap();
    client.login("admin", "").await.unwrap();
    let files = client
        .files(FileQuery {
            start: DvrTime(Some(EPOCH)),
            end: DvrTime(None),
            channel: 0,
            event: Default::default(),
            kind: FileKind::Video,
        })
        .await
        .unwrap();

    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["/idea0/a.h264", "/idea0/b.h264"]);
    device.await.unwrap();
}

#[tokio::test]
async fn test_file_search_empty() {
    init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let device = tokio::spawn(async move {
        let mut device = accept(&listener).await;
        serve_login(&mut device, 0x57, 21, false).await;
        let (packet, _) = read_request(&mut device).await;
        send_reply(
            &mut device,
            0x57,
            packet.number,
            MSG_ID_GET_FILES_REPLY,
            &json!({
                "Ret": 119,
                "Name": "OPFileQuery",
                "SessionID": "0x00000057",
            }),
        )
        .await;
    });

    let mut client = DvripClient::connect(addr).await.unwrap();
    client.login("admin", "").await.unwrap();
    let files = client
        .files(FileQuery {
            start: DvrTime(Some(EPOCH)),
            end: DvrTime(None),
            channel: 0,
            event: Default::default(),
            kind: FileKind::Image,
        })
        .await
        .unwrap();
    assert!(files.is_empty());
    device.await.unwrap();
}

#[tokio::test]
async fn test_monitor_stream() {
    init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let device = tokio::spawn(async move {
        let mut control = accept(&listener).await;
        serve_login(&mut control, 0x57, 21, false).await;
        let mut data = accept(&listener).await;

        // The claim arrives on the data connection before the perform
        // request runs on the control connection.
        let (claim, body) = read_request(&mut data).await;
        assert_eq!(claim.ty, MSG_ID_MONITOR_CLAIM);
        assert_eq!(claim.session, 0x57);
        assert_eq!(claim.number, 0);
        assert_eq!(body["OPMonitor"]["Action"], "Claim");

        let (packet, body) = read_request(&mut control).await;
        assert_eq!(packet.ty, MSG_ID_MONITOR);
        assert_eq!(body["OPMonitor"]["Action"], "Start");
        assert_eq!(body["OPMonitor"]["Parameter"]["StreamType"], "Main");
        send_reply(
            &mut control,
            0x57,
            packet.number,
            MSG_ID_MONITOR_REPLY,
            &json!({ "Ret": 100, "SessionID": "0x00000057", "Name": "OPMonitor" }),
        )
        .await;

        send_reply(
            &mut data,
            0x57,
            claim.number,
            MSG_ID_MONITOR_CLAIM_REPLY,
            &json!({ "Ret": 100, "SessionID": "0x00000057", "Name": "OPMonitor" }),
        )
        .await;

        data.send(Packet::stream(
            0x57,
            0,
            MSG_ID_MONITOR_DATA,
            Bytes::from_static(b"hello"),
            0,
            false,
        ))
        .await
        .unwrap();
        data.send(Packet::stream(
            0x57,
            0,
            MSG_ID_MONITOR_DATA,
            Bytes::from_static(b"world"),
            0,
            true,
        ))
        .await
        .unwrap();
    });

    let mut client = DvripClient::connect(addr).await.unwrap();
    client.login("admin", "").await.unwrap();
    let data_stream = TcpStream::connect(addr).await.unwrap();
    let mut reader = client.monitor(data_stream, 0, StreamKind::Hd).await.unwrap();

    let first = reader.read_chunk().await.unwrap().unwrap();
    assert_eq!(&first[..], b"hello");
    let second = reader.read_chunk().await.unwrap().unwrap();
    assert_eq!(&second[..], b"world");
    assert_eq!(reader.read_chunk().await.unwrap(), None);
    assert_eq!(reader.read_chunk().await.unwrap(), None);
    device.await.unwrap();
}

#[tokio::test]
async fn test_failing_status_is_a_request_error() {
    init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let device = tokio::spawn(async move {
        let mut device = accept(&listener).await;
        serve_login(&mut device, 0x57, 21, false).await;
        let (packet, _) = read_request(&mut device).await;
        assert_eq!(packet.ty, MSG_ID_GET_TIME);
        send_reply(
            &mut device,
            0x57,
            packet.number,
            MSG_ID_GET_TIME_REPLY,
            &json!({
                "Ret": 105,
                "Name": "OPTimeQuery",
                "SessionID": "0x00000057",
                "OPTimeQuery": "0000-00-00 00:00:00",
            }),
        )
        .await;
    });

    let mut client = DvripClient::connect(addr).await.unwrap();
    client.login("admin", "").await.unwrap();
    match client.time().await {
        Err(Error::Request(error)) => {
            assert_eq!(error.code(), 105);
            assert_eq!(error.message(), "Not logged in");
        }
        other => panic!("expected a request error, got {:?}", other),
    }
    device.await.unwrap();
}

#[tokio::test]
async fn test_stray_packet_fails_the_request() {
    init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let device = tokio::spawn(async move {
        let mut device = accept(&listener).await;
        serve_login(&mut device, 0x57, 21, false).await;
        let (packet, _) = read_request(&mut device).await;
        assert_eq!(packet.ty, MSG_ID_GET_TIME);
        // Answer with something from a different transaction entirely.
        send_reply(
            &mut device,
            0x57,
            packet.number,
            MSG_ID_GET_LOG_REPLY,
            &json!({
                "Ret": 100,
                "SessionID": "0x00000057",
                "Name": "OPLogQuery",
                "OPLogQuery": null,
            }),
        )
        .await;
    });

    let mut client = DvripClient::connect(addr).await.unwrap();
    client.login("admin", "").await.unwrap();
    match client.time().await {
        Err(Error::Decode(DecodeError::StrayPacket)) => {}
        other => panic!("expected a stray packet error, got {:?}", other),
    }
    device.await.unwrap();
}

#[tokio::test]
async fn test_request_numbers_are_monotone() {
    init();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let device = tokio::spawn(async move {
        let mut device = accept(&listener).await;
        serve_login(&mut device, 0x57, 21, false).await;
        for expected in [2u32, 4, 6] {
            let (packet, _) = read_request(&mut device).await;
            assert_eq!(packet.ty, MSG_ID_GET_TIME);
            assert_eq!(packet.number, expected);
            send_reply(
                &mut device,
                0x57,
                packet.number,
                MSG_ID_GET_TIME_REPLY,
                &json!({
                    "Ret": 100,
                    "Name": "OPTimeQuery",
                    "SessionID": "0x00000057",
                    "OPTimeQuery": "2019-07-30 21:24:16",
                }),
            )
            .await;
        }
    });

    let mut client = DvripClient::connect(addr).await.unwrap();
    client.login("admin", "").await.unwrap();
    for _ in 0..3 {
        assert!(client.time().await.unwrap().is_some());
    }
    device.await.unwrap();
}
