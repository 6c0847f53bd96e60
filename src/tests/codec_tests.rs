//! tests/codec_tests.rs - Address codec and checksum coverage

#[cfg(test)]
mod tests {
    use crate::address::codec::{detect, from_friendly, to_friendly, to_raw, AddressError};
    use crate::address::crc::crc16_checksum;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    const ACCOUNT_HEX: &str = "25f2bf1ce8f83ed6c1b0f6b0c4c8a1de9f2e4b6a8c0d2e4f60718293a4b5c6d7";

    fn raw(workchain: i32) -> String {
        format!("{}:{}", workchain, ACCOUNT_HEX)
    }

    #[test]
    fn checksum_is_deterministic() {
        assert_eq!(crc16_checksum(b""), [0x00, 0x00]);
        // CRC-16/XMODEM check value
        assert_eq!(crc16_checksum(b"123456789"), [0x31, 0xC3]);
        assert_eq!(crc16_checksum(b"jetton"), crc16_checksum(b"jetton"));
    }

    #[test]
    fn round_trip_all_renderings() {
        for workchain in [-1, 0, 1] {
            let raw_form = raw(workchain);
            let forms = to_friendly(&raw_form, false).unwrap();
            assert_eq!(forms.raw_form, raw_form);

            for (text, bounceable) in [
                (&forms.bounceable.b64, true),
                (&forms.bounceable.b64url, true),
                (&forms.non_bounceable.b64, false),
                (&forms.non_bounceable.b64url, false),
            ] {
                assert_eq!(text.len(), 48);
                let decoded = from_friendly(text).unwrap();
                assert_eq!(decoded.raw_form, raw_form);
                assert_eq!(decoded.bounceable, bounceable);
                assert!(!decoded.test_only);
            }
        }
    }

    #[test]
    fn friendly_prefixes_match_known_convention() {
        let basechain = to_friendly(&raw(0), false).unwrap();
        assert!(basechain.bounceable.b64.starts_with("EQ"));
        assert!(basechain.non_bounceable.b64.starts_with("UQ"));

        let masterchain = to_friendly(&raw(-1), false).unwrap();
        assert!(masterchain.bounceable.b64.starts_with("Ef"));
        assert!(masterchain.non_bounceable.b64.starts_with("Uf"));
    }

    #[test]
    fn any_single_bit_flip_is_rejected() {
        for raw_form in [raw(0), raw(-1)] {
            let forms = to_friendly(&raw_form, false).unwrap();
            let frame = STANDARD.decode(&forms.bounceable.b64).unwrap();
            assert_eq!(frame.len(), 36);

            for byte in 0..frame.len() {
                for bit in 0..8 {
                    let mut corrupted = frame.clone();
                    corrupted[byte] ^= 1 << bit;
                    let text = STANDARD.encode(&corrupted);
                    assert!(
                        from_friendly(&text).is_err(),
                        "flip of byte {} bit {} was accepted",
                        byte,
                        bit
                    );
                }
            }
        }
    }

    #[test]
    fn test_only_flag_round_trips() {
        let forms = to_friendly(&raw(0), true).unwrap();
        let frame = STANDARD.decode(&forms.bounceable.b64).unwrap();
        assert_eq!(frame[0] & 0x80, 0x80);
        assert_eq!(frame[0] & 0x7F, 0x11);

        let decoded = from_friendly(&forms.bounceable.b64).unwrap();
        assert!(decoded.test_only);
        assert!(decoded.bounceable);

        let decoded = from_friendly(&forms.non_bounceable.b64url).unwrap();
        assert!(decoded.test_only);
        assert!(!decoded.bounceable);
    }

    #[test]
    fn workchain_byte_mapping() {
        let frame = STANDARD
            .decode(&to_friendly(&raw(0), false).unwrap().bounceable.b64)
            .unwrap();
        assert_eq!(frame[1], 0x00);

        let frame = STANDARD
            .decode(&to_friendly(&raw(-1), false).unwrap().bounceable.b64)
            .unwrap();
        assert_eq!(frame[1], 0xFF);

        let decoded = from_friendly(&to_friendly(&raw(5), false).unwrap().bounceable.b64).unwrap();
        assert!(decoded.raw_form.starts_with("5:"));

        // 255 would collide with -1 in the byte form
        assert_eq!(
            to_friendly(&raw(255), false),
            Err(AddressError::WorkchainOutOfRange(255))
        );
    }

    #[test]
    fn detect_prefers_hex_over_everything() {
        let forms = detect(ACCOUNT_HEX).unwrap();
        assert_eq!(forms.raw_form, format!("-1:{}", ACCOUNT_HEX));

        let forms = detect("deadbeef").unwrap();
        assert_eq!(
            forms.raw_form,
            format!("-1:{}{}", "0".repeat(56), "deadbeef")
        );
    }

    #[test]
    fn detect_handles_raw_and_friendly_forms() {
        let raw_form = raw(0);
        let from_raw = detect(&raw_form).unwrap();
        assert_eq!(from_raw.raw_form, raw_form);

        let from_friendly_text = detect(&from_raw.bounceable.b64url).unwrap();
        assert_eq!(from_friendly_text, from_raw);
    }

    #[test]
    fn mixed_alphabets_are_rejected() {
        assert_eq!(from_friendly("+_"), Err(AddressError::InvalidCharset));
        assert_eq!(from_friendly(""), Err(AddressError::InvalidCharset));

        let forms = to_friendly(&raw(0), false).unwrap();
        let mut mixed = forms.bounceable.b64url.clone();
        mixed.push('+');
        mixed.push('_');
        assert_eq!(from_friendly(&mixed), Err(AddressError::InvalidCharset));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut frame = vec![0x22, 0x00];
        frame.extend_from_slice(&[0u8; 32]);
        let crc = crc16_checksum(&frame);
        frame.extend_from_slice(&crc);

        assert_eq!(
            from_friendly(&STANDARD.encode(&frame)),
            Err(AddressError::UnknownTag(0x22))
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(from_friendly("AAAA"), Err(AddressError::InvalidLength(3)));
    }

    #[test]
    fn to_raw_zero_pads() {
        let mut account_id = [0u8; 32];
        account_id[31] = 0x2A;
        assert_eq!(to_raw(0, &account_id), format!("0:{}2a", "0".repeat(62)));
    }

    #[test]
    fn malformed_raw_forms_are_rejected() {
        let overlong = format!("0:{}0", ACCOUNT_HEX);
        for input in ["no-colon", "x:abc", "0:", "0:zz", overlong.as_str()] {
            assert!(matches!(
                to_friendly(input, false),
                Err(AddressError::MalformedRaw(_))
            ));
        }
    }
}
