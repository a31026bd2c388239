//! IP literal detection for hosts.
//!
//! A host that is an IPv4 dotted quad or a bracketed IPv6 address is written
//! verbatim by the serializer; any other host is percent-encoded as a reg-name.

use crate::pct_enc::OCTET_TABLE_LO as HEX_TABLE;

/// Checks whether a host is an IPv4 address in dotted-decimal form.
pub(crate) fn is_v4_literal(host: &str) -> bool {
    parse_v4(host.as_bytes()).is_some()
}

/// Checks whether a host is an IPv6 address enclosed in square brackets.
pub(crate) fn is_v6_literal(host: &str) -> bool {
    match host.as_bytes() {
        [b'[', addr @ .., b']'] => parse_v6(addr).is_some(),
        _ => false,
    }
}

fn parse_v4(s: &[u8]) -> Option<[u8; 4]> {
    let mut out = [0; 4];
    let mut parts = s.split(|&x| x == b'.');
    for octet in &mut out {
        *octet = dec_octet(parts.next()?)?;
    }
    parts.next().is_none().then_some(out)
}

// dec-octet = DIGIT             ; 0-9
//           / %x31-39 DIGIT     ; 10-99
//           / "1" 2DIGIT        ; 100-199
//           / "2" %x30-34 DIGIT ; 200-249
//           / "25" %x30-35      ; 250-255
fn dec_octet(s: &[u8]) -> Option<u8> {
    match s {
        [x @ b'0'..=b'9'] => Some(x - b'0'),
        [b'1'..=b'9', rest @ ..] if rest.len() <= 2 && rest.iter().all(u8::is_ascii_digit) => {
            let x = s
                .iter()
                .fold(0u16, |acc, &x| acc * 10 + u16::from(x - b'0'));
            u8::try_from(x).ok()
        }
        _ => None,
    }
}

fn parse_v6(s: &[u8]) -> Option<[u16; 8]> {
    let mut segs = [0u16; 8];
    let Some(i) = s.windows(2).position(|w| w == b"::") else {
        // No ellipsis, all eight groups must be present.
        return (parse_groups(s, &mut segs, true)? == 8).then_some(segs);
    };

    // An ellipsis elides at least one group.
    let head = parse_groups(&s[..i], &mut segs[..7], false)?;
    let mut tail_segs = [0u16; 7];
    let tail = parse_groups(&s[i + 2..], &mut tail_segs[..7 - head], true)?;
    segs[8 - tail..].copy_from_slice(&tail_segs[..tail]);
    Some(segs)
}

/// Parses colon-separated hexadecimal groups into `out`, returning how many were read.
///
/// When `v4_tail` is set, the last group may be an IPv4 address taking up two groups.
fn parse_groups(s: &[u8], out: &mut [u16], v4_tail: bool) -> Option<usize> {
    if s.is_empty() {
        return Some(0);
    }

    let mut n = 0;
    let mut parts = s.split(|&x| x == b':').peekable();
    while let Some(part) = parts.next() {
        if v4_tail && parts.peek().is_none() && part.contains(&b'.') {
            let [a, b, c, d] = parse_v4(part)?;
            if n + 2 > out.len() {
                return None;
            }
            out[n] = u16::from_be_bytes([a, b]);
            out[n + 1] = u16::from_be_bytes([c, d]);
            return Some(n + 2);
        }

        if n == out.len() || part.is_empty() || part.len() > 4 {
            return None;
        }
        out[n] = part.iter().try_fold(0u16, |acc, &x| {
            let digit = HEX_TABLE[x as usize];
            (digit < 16).then(|| acc << 4 | u16::from(digit))
        })?;
        n += 1;
    }
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn v6(s: &str) -> Option<Ipv6Addr> {
        parse_v6(s.as_bytes()).map(Ipv6Addr::from)
    }

    #[test]
    fn test_dec_octet() {
        for i in 0..=u8::MAX {
            assert_eq!(Some(i), dec_octet(i.to_string().as_bytes()));
        }
        assert!(dec_octet(b"256").is_none());
        assert!(dec_octet(b"01").is_none());
        assert!(dec_octet(b"1000").is_none());
        assert!(dec_octet(b"").is_none());
    }

    #[test]
    fn test_parse_v4() {
        let v4 = |s: &str| parse_v4(s.as_bytes()).map(Ipv4Addr::from);
        assert_eq!(Some(Ipv4Addr::new(127, 0, 0, 1)), v4("127.0.0.1"));
        assert_eq!(Some(Ipv4Addr::BROADCAST), v4("255.255.255.255"));
        assert_eq!(Some(Ipv4Addr::UNSPECIFIED), v4("0.0.0.0"));

        // out of range
        assert!(v4("300.100.50.1").is_none());
        // too short
        assert!(v4("255.0.0").is_none());
        // too long
        assert!(v4("255.0.0.1.2").is_none());
        // no number between dots
        assert!(v4("255.0..1").is_none());
        // octal
        assert!(v4("255.0.0.01").is_none());
        // preceding or trailing dot
        assert!(v4(".0.0.0.0").is_none());
        assert!(v4("0.0.0.0.").is_none());
    }

    #[test]
    fn test_parse_v6() {
        assert_eq!(Some(Ipv6Addr::UNSPECIFIED), v6("0:0:0:0:0:0:0:0"));
        assert_eq!(
            Some(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8)),
            v6("1:02:003:0004:0005:006:07:8")
        );
        assert_eq!(Some(Ipv6Addr::LOCALHOST), v6("::1"));
        assert_eq!(Some(Ipv6Addr::new(1, 0, 0, 0, 0, 0, 0, 0)), v6("1::"));
        assert_eq!(Some(Ipv6Addr::UNSPECIFIED), v6("::"));
        assert_eq!(
            Some(Ipv6Addr::new(0x2001, 0xdb8, 0x85a3, 0, 0, 0x8a2e, 0x370, 0x7334)),
            v6("2001:db8:85a3::8a2e:370:7334")
        );
        assert_eq!(
            Some(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 0)),
            v6("1:2:3:4:5:6:7::")
        );

        // only a colon
        assert!(v6(":").is_none());
        // too long group
        assert!(v6("::00000").is_none());
        // too short
        assert!(v6("1:2:3:4:5:6:7").is_none());
        // too long
        assert!(v6("1:2:3:4:5:6:7:8:9").is_none());
        // triple colon
        assert!(v6("1:2:::6:7:8").is_none());
        assert!(v6(":::").is_none());
        // two double colons
        assert!(v6("1:2::6::8").is_none());
        assert!(v6("::6::8").is_none());
        // `::` indicating zero groups of zeros
        assert!(v6("::1:2:3:4:5:6:7:8").is_none());
        assert!(v6("1:2:3:4::5:6:7:8").is_none());
        assert!(v6("1:2:3:4:5:6:7:8::").is_none());
        // preceding or trailing colon
        assert!(v6(":1:2:3:4:5:6:7:8").is_none());
        assert!(v6("1:2:3:4:5:6:7:8:").is_none());
    }

    #[test]
    fn test_parse_v4_in_v6() {
        assert_eq!(
            Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 49152, 545)),
            v6("::FFFF:192.0.2.33")
        );
        assert_eq!(
            Some(Ipv6Addr::new(
                0x2001, 0xdb8, 0x122, 0xc000, 0x2, 0x2100, 49152, 545
            )),
            v6("2001:db8:122:c000:2:2100:192.0.2.33")
        );

        // colon after v4
        assert!(v6("::127.0.0.1:").is_none());
        // v4 before the ellipsis
        assert!(v6("127.0.0.1::").is_none());
        // not enough groups
        assert!(v6("1:2:3:4:5:127.0.0.1").is_none());
        // too many groups
        assert!(v6("1:2:3:4:5:6:7:127.0.0.1").is_none());
    }

    #[test]
    fn literals() {
        assert!(is_v4_literal("10.0.0.1"));
        assert!(!is_v4_literal("foo.com"));
        assert!(is_v6_literal("[::1]"));
        assert!(is_v6_literal("[2001:db8:85a3::8a2e:370:7334]"));
        assert!(!is_v6_literal("::1"));
        assert!(!is_v6_literal("[::1"));
        assert!(!is_v6_literal("[]"));
    }
}
