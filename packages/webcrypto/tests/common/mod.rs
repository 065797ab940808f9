//! Shared RSA test fixture: a real 2048-bit key with full CRT
//! parameters, as unpadded base64url JWK members.

#![allow(dead_code)]

use kestrel_webcrypto::{import_key, CryptoKey, KeyData, KeyFormat, KeyUsages};
use serde_json::{json, Value};

pub const N: &str = "8djXYo1ACX9COiNOSozKOxeFa98zyEEnkzhxRuUaDjIMMj2gUKqs0fOPKi2jTVWaY4o8cHSbMkS4zzkH9pHSg_FbZ6r0By6qjhHAkG5mfuW27ng1MhAsxboXRuZX46TciFcFXZJ1v56Pkhohff0UI2nCDOsuqpwzNnMVJ-2d_QJwgonV80agPMgP_ELAoEfMsGLnmOL98MRrqihHFTgf80NdJdKFXN3bdcFPUHBxZOTt-hAhcc25as4toHFaQWacJ6_IjKGfiHlImY5pTwJD9f6BKofR2LU8wWOWDUi09pk2ic7GKlyW1h3q9ra_ct-roGIW5luab1G5FjBsP0qs3w";

pub const E: &str = "AQAB";

pub const D: &str = "JEfS2-JzulkAbudP_egMCHxZVBrqUj7P-Iptl-STmZCRetH65E8OWPqwPfQVvOq8G_WnZnlftNVRYijclHVAvvFstGsVa6RpCqIIIMKnFp9QZ4rZ9BYwGUN27Xhts-VN_hgL4oMvrdzUDedkodle9YcOiNCZMhf3qNHv2QsQ-dzippkh9tbfjWpynuozdaz6Tdv82YSBNptLLNSdodyfC0zprC6zu4vnw2b4NOqJk2939NtW91sb3re9UajG-XSsH02Tn1eUrLFCKHHc-VitGmkCAym8Y20U_ToYeMGzRkCp3qsxaJv2YeqvsHxLn-Kex_DEPw3lTYbS594l7EqvmQ";

pub const P: &str = "_l5GOkxkScg6gk60XDRxcgy_hfpvyh60E3sV8bgzTUXAen0TYU20nop903o1IiHd1FUnLQgIbOOvPNjOpm37qQqHljQbGfU4varu1LZI4LCEUHHUWcctycDXpyn5WsPjmLgNOs1Lv4w7GjIg0r-xsfap8hHkbfcLsQlBbFw1SFc";

pub const Q: &str = "82YBKyOgg7qpi0yKXAo7kTUpRGPrLtghdSYUpuDVW1TJDCmW88bjDjKNOP-TKiGbGCAeHhHwpce4XCPmwFGBsUaKWgfuJH7g6ACaQfUHE2HbTcoP-74CtLPwOrDKUc1DmkT50zxTThtJsR0DfikkTCpIz3DFv9aR0anhelX6Crk";

pub const DP: &str = "JGcTf9Zc59462VkwIJ30ulCuvBrKEs_wD3Wm_0_QL7fSwvTRaDR5q9LADRrJLdhQ6clB8QTcR9ERzBBvCoxk3p0-KDXOxxk8BJDI2zI3HcjFNsoDjNGfcOcjNa4hHGc6VCnK4uZsd7422xnfbqm2YXSef6El4sLfLnfXoA1WJsM";

pub const DQ: &str = "D6HAd3XNTEiDtQeQZ0Lc-oFwigzkwNhupahxcRpFeZ0jYF2XbUabtIC4oy1-1Rjdbho59PJwAyWliH1hx340lx8RqaCSwdNIPH41agEDmFITlJZimmdkoxhfWFWcWM6XBeRiKxfXvc9w1ygm3kZkJ2Qb0v7KJHzyVoXTjljROzk";

pub const QI: &str = "X3FmHeFRTjPKaA5mKcCPJqu4Xk0XX0Ft7ro2nHqf6CV72M269q5vZx9kjlf5gjwJ1WxjxLpfZTyMKl8UcZAtlfubzcHuxrXI98w_WC98yM8a6NWECLA6bpaTHeQU2OixdgbbPZtEP5b53zJBTEf_daKOiv3fEOinQgSoc8ZRiCE";

/// The fixture modulus with one superfluous leading zero octet.
pub const N_LEADING_ZERO: &str = "APHY12KNQAl_QjojTkqMyjsXhWvfM8hBJ5M4cUblGg4yDDI9oFCqrNHzjyoto01VmmOKPHB0mzJEuM85B_aR0oPxW2eq9Acuqo4RwJBuZn7ltu54NTIQLMW6F0bmV-Ok3IhXBV2Sdb-ej5IaIX39FCNpwgzrLqqcMzZzFSftnf0CcIKJ1fNGoDzID_xCwKBHzLBi55ji_fDEa6ooRxU4H_NDXSXShVzd23XBT1BwcWTk7foQIXHNuWrOLaBxWkFmnCevyIyhn4h5SJmOaU8CQ_X-gSqH0di1PMFjlg1ItPaZNonOxipcltYd6va2v3Lfq6BiFuZbmm9RuRYwbD9KrN8";

pub fn public_jwk() -> Value {
    json!({ "kty": "RSA", "n": N, "e": E })
}

pub fn private_jwk() -> Value {
    json!({
        "kty": "RSA",
        "n": N,
        "e": E,
        "d": D,
        "p": P,
        "q": Q,
        "dp": DP,
        "dq": DQ,
        "qi": QI,
    })
}

pub fn rsassa_sha256() -> Value {
    json!({ "name": "RSASSA-PKCS1-v1_5", "hash": "SHA-256" })
}

pub fn import_public(usages: KeyUsages) -> CryptoKey {
    import_key(
        KeyFormat::Jwk,
        KeyData::Jwk(&public_jwk()),
        &rsassa_sha256(),
        true,
        usages,
    )
    .expect("public fixture key imports")
}

pub fn import_private(usages: KeyUsages) -> CryptoKey {
    import_key(
        KeyFormat::Jwk,
        KeyData::Jwk(&private_jwk()),
        &rsassa_sha256(),
        true,
        usages,
    )
    .expect("private fixture key imports")
}
