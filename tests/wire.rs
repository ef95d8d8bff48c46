use hci_codec::hci::acl::{self, AclDataPacket};
use hci_codec::hci::commands::{Disconnect, HciCommand, Inquiry, LeSetRandomAddress, ReadRssi, Reset};
use hci_codec::hci::sync::SynchronousDataPacket;
use hci_codec::hci::{
    CommandComplete, CommandPacket, CommandRegistry, EventPacket, EventRegistry, HciEvent, Handle, Opcode,
};
use hci_codec::{encode, parse, BdAddr, DecoderConfig, Dispatcher, Error, HciPacket, Packet, PacketType};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn reset_command_frame() {
    init();
    let reset = CommandPacket::from(&Reset);
    let mut body = Vec::new();
    reset.encode_body(&mut body);
    assert_eq!(body, vec![0x03, 0x0C, 0x00]);
    assert_eq!(encode(&Packet::from(HciCommand::Reset(Reset))), vec![0x01, 0x03, 0x0C, 0x00]);
}

#[test]
fn decode_reset_frame() {
    init();
    let dispatcher = Dispatcher::new(CommandRegistry::new());
    match dispatcher.parse(&[0x01, 0x03, 0x0C, 0x00]) {
        Ok(Packet::Command(HciCommand::Generic(command))) => {
            assert_eq!(command.opcode(), Opcode(0x0C03));
            assert_eq!(command.ogf(), 3);
            assert_eq!(command.ocf(), 3);
            assert!(command.parameters().is_empty());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn decode_acl_frame() {
    init();
    match parse(&[0x02, 0x05, 0x00, 0x02, 0x00, 0xAB, 0xCD]) {
        Ok(Packet::AclData(acl)) => {
            assert_eq!(acl.connection_handle(), 5);
            assert_eq!(acl.pb_flag(), 0);
            assert_eq!(acl.bc_flag(), 0);
            assert_eq!(acl.data(), &[0xAB, 0xCD]);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn dispatcher_classification() {
    init();
    assert_eq!(parse(&[]), Err(Error::Empty));
    assert_eq!(parse(&[0x09, 0x01, 0x02]), Err(Error::UnknownPacketType(0x09)));
    assert_eq!(parse(&[0x04, 0x0E, 0x00]), Err(Error::NotImplemented(PacketType::Event)));
    assert_eq!(parse(&[0x05]), Err(Error::NotImplemented(PacketType::IsoData)));
    assert!(!parse(&[0x04]).unwrap_err().is_malformed());
    assert!(parse(&[0x02, 0x05]).unwrap_err().is_malformed());
}

#[test]
fn typed_commands_roundtrip_through_dispatcher() {
    init();
    let handle = Handle::new(0x0EFF).unwrap();
    let address: BdAddr = "C0:FF:EE:00:11:22".parse().unwrap();
    let commands = vec![
        HciCommand::from(Reset),
        HciCommand::from(Inquiry::new(Inquiry::LIAC, 0x10, 3).unwrap()),
        HciCommand::from(Disconnect::new(handle, Disconnect::REMOTE_USER_TERMINATED)),
        HciCommand::from(ReadRssi::new(handle)),
        HciCommand::from(LeSetRandomAddress { address }),
        HciCommand::Generic(CommandPacket::from_fields(0x3F, 0x0123, &[9, 8, 7]).unwrap()),
    ];

    for command in commands {
        let packet = Packet::from(command);
        let frame = encode(&packet);
        assert_eq!(parse(&frame), Ok(packet));
    }
}

#[test]
fn data_packets_roundtrip() {
    init();
    let packets = vec![
        Packet::from(AclDataPacket::new(0x0001, acl::boundary::CONTINUING, 0, vec![]).unwrap()),
        Packet::from(AclDataPacket::new(0x0EFF, 3, 3, vec![0x55; 0xFFFF]).unwrap()),
        Packet::from(SynchronousDataPacket::new(0x0002, 2, vec![0xAA; 0xFF]).unwrap()),
        Packet::from(SynchronousDataPacket::new(0x0EFF, 0, vec![]).unwrap()),
    ];

    for packet in packets {
        assert_eq!(parse(&encode(&packet)), Ok(packet));
    }
}

#[test]
fn boundary_lengths_rejected_at_construction() {
    init();
    assert_eq!(
        CommandPacket::new(Opcode::RESET, &[0; 256]),
        Err(Error::ParameterTooLong(256))
    );
    assert_eq!(
        AclDataPacket::new(1, 0, 0, vec![0; 0x10000]),
        Err(Error::PayloadTooLong { len: 0x10000, max: 0xFFFF })
    );
    assert_eq!(
        SynchronousDataPacket::new(1, 0, vec![0; 0x100]),
        Err(Error::PayloadTooLong { len: 0x100, max: 0xFF })
    );
    assert_eq!(AclDataPacket::new(0x0F00, 0, 0, vec![]), Err(Error::InvalidHandle(0x0F00)));
    assert_eq!(SynchronousDataPacket::new(0x0F00, 0, vec![]), Err(Error::InvalidHandle(0x0F00)));
}

#[test]
fn events_with_decoding_enabled() {
    init();
    let dispatcher = Dispatcher::with_config(
        CommandRegistry::standard(),
        EventRegistry::standard(),
        DecoderConfig::default().with_decode_events(true),
    );
    let event = EventPacket::new(0x0F, &[0x00, 0x01, 0x03, 0x0C]).unwrap();
    let frame = event.encode();
    assert_eq!(dispatcher.parse(&frame), Ok(Packet::from(event)));
    assert_eq!(dispatcher.parse(&[0x05, 0x00]), Err(Error::NotImplemented(PacketType::IsoData)));

    // Read_BD_ADDR complete: status, then the address
    let frame = [0x04, 0x0E, 0x0A, 0x01, 0x09, 0x10, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
    match dispatcher.parse(&frame) {
        Ok(Packet::Event(HciEvent::CommandComplete(complete))) => {
            assert_eq!(complete.opcode(), Opcode::READ_BD_ADDR);
            let address = BdAddr::from_slice(&complete.return_parameters()[1..]).unwrap();
            assert_eq!(address.to_string(), "06:05:04:03:02:01");
            assert_eq!(encode(&Packet::from(HciEvent::from(complete))), frame.to_vec());
        }
        other => panic!("unexpected {:?}", other),
    }
    let complete = CommandComplete::new(1, Opcode::RESET, &[0x00]).unwrap();
    let packet = Packet::from(HciEvent::from(complete));
    assert_eq!(dispatcher.parse(&encode(&packet)), Ok(packet));
}

#[test]
fn generic_commands_roundtrip_through_registry() {
    init();
    let packets = vec![
        Packet::from(CommandPacket::new(Opcode::RESET, &[]).unwrap()),
        Packet::from(CommandPacket::new(Opcode::RESET, &[0xAA]).unwrap()),
        Packet::from(CommandPacket::new(Opcode::READ_RSSI, &[0x00, 0x0F]).unwrap()),
        Packet::from(CommandPacket::new(Opcode::INQUIRY, &[0x33, 0x8B, 0x9E, 0x08, 0x00]).unwrap()),
    ];

    for packet in packets {
        assert_eq!(parse(&encode(&packet)), Ok(packet));
    }

    match parse(&[0x01, 0x03, 0x0C, 0x01, 0xAA]) {
        Ok(Packet::Command(HciCommand::Generic(command))) => assert_eq!(command.parameters(), &[0xAA]),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn too_short_errors_count_the_indicator() {
    init();
    assert_eq!(parse(&[0x02, 0x05]), AclDataPacket::decode(&[0x02, 0x05]).map(Packet::from));
    assert_eq!(
        parse(&[0x03, 0x05, 0x00]),
        SynchronousDataPacket::decode(&[0x03, 0x05, 0x00]).map(Packet::from)
    );
}

#[test]
fn address_forms() {
    let addr = BdAddr::from_bytes([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
    assert_eq!(addr.to_string(), "06:05:04:03:02:01");
    let parsed: BdAddr = "06:05:04:03:02:01".parse().unwrap();
    assert_eq!(parsed.as_bytes(), &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
    assert_eq!(BdAddr::try_from_u64(parsed.to_u64()), Ok(parsed));
}

#[test]
fn display_forms() {
    let packet = parse(&[0x01, 0x05, 0x14, 0x02, 0x01, 0x00]).unwrap();
    assert!(packet.to_string().contains("Read_RSSI"));

    let packet = parse(&[0x02, 0x05, 0x20, 0x01, 0x00, 0xAB]).unwrap();
    assert_eq!(packet.to_string(), "HCI ACL Data handle 0x005 pb 2 bc 0 len 1");
}
