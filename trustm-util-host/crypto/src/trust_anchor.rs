// Licensed under the Apache-2.0 license

//! Trust anchors for chip authentication
//!
//! DER encoded issuing CA certificates for chip device certificates.

/// "Infineon OPTIGA(TM) Trust X CA 101": P-256 issuing CA, signed by the
/// Infineon OPTIGA(TM) ECC Root CA with ecdsa-with-SHA384.
pub const OPTIGA_TRUST_CA_101: [u8; 636] = [
    0x30, 0x82, 0x02, 0x78, 0x30, 0x82, 0x01, 0xfe, 0xa0, 0x03, 0x02, 0x01,
    0x02, 0x02, 0x04, 0x6a, 0xdb, 0xdd, 0xd6, 0x30, 0x0a, 0x06, 0x08, 0x2a,
    0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x03, 0x30, 0x77, 0x31, 0x0b, 0x30,
    0x09, 0x06, 0x03, 0x55, 0x04, 0x06, 0x13, 0x02, 0x44, 0x45, 0x31, 0x21,
    0x30, 0x1f, 0x06, 0x03, 0x55, 0x04, 0x0a, 0x0c, 0x18, 0x49, 0x6e, 0x66,
    0x69, 0x6e, 0x65, 0x6f, 0x6e, 0x20, 0x54, 0x65, 0x63, 0x68, 0x6e, 0x6f,
    0x6c, 0x6f, 0x67, 0x69, 0x65, 0x73, 0x20, 0x41, 0x47, 0x31, 0x1b, 0x30,
    0x19, 0x06, 0x03, 0x55, 0x04, 0x0b, 0x0c, 0x12, 0x4f, 0x50, 0x54, 0x49,
    0x47, 0x41, 0x28, 0x54, 0x4d, 0x29, 0x20, 0x44, 0x65, 0x76, 0x69, 0x63,
    0x65, 0x73, 0x31, 0x28, 0x30, 0x26, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0c,
    0x1f, 0x49, 0x6e, 0x66, 0x69, 0x6e, 0x65, 0x6f, 0x6e, 0x20, 0x4f, 0x50,
    0x54, 0x49, 0x47, 0x41, 0x28, 0x54, 0x4d, 0x29, 0x20, 0x45, 0x43, 0x43,
    0x20, 0x52, 0x6f, 0x6f, 0x74, 0x20, 0x43, 0x41, 0x30, 0x1e, 0x17, 0x0d,
    0x31, 0x37, 0x30, 0x38, 0x32, 0x39, 0x31, 0x36, 0x32, 0x37, 0x30, 0x38,
    0x5a, 0x17, 0x0d, 0x34, 0x32, 0x30, 0x38, 0x32, 0x39, 0x31, 0x36, 0x32,
    0x37, 0x30, 0x38, 0x5a, 0x30, 0x72, 0x31, 0x0b, 0x30, 0x09, 0x06, 0x03,
    0x55, 0x04, 0x06, 0x13, 0x02, 0x44, 0x45, 0x31, 0x21, 0x30, 0x1f, 0x06,
    0x03, 0x55, 0x04, 0x0a, 0x0c, 0x18, 0x49, 0x6e, 0x66, 0x69, 0x6e, 0x65,
    0x6f, 0x6e, 0x20, 0x54, 0x65, 0x63, 0x68, 0x6e, 0x6f, 0x6c, 0x6f, 0x67,
    0x69, 0x65, 0x73, 0x20, 0x41, 0x47, 0x31, 0x13, 0x30, 0x11, 0x06, 0x03,
    0x55, 0x04, 0x0b, 0x0c, 0x0a, 0x4f, 0x50, 0x54, 0x49, 0x47, 0x41, 0x28,
    0x54, 0x4d, 0x29, 0x31, 0x2b, 0x30, 0x29, 0x06, 0x03, 0x55, 0x04, 0x03,
    0x0c, 0x22, 0x49, 0x6e, 0x66, 0x69, 0x6e, 0x65, 0x6f, 0x6e, 0x20, 0x4f,
    0x50, 0x54, 0x49, 0x47, 0x41, 0x28, 0x54, 0x4d, 0x29, 0x20, 0x54, 0x72,
    0x75, 0x73, 0x74, 0x20, 0x58, 0x20, 0x43, 0x41, 0x20, 0x31, 0x30, 0x31,
    0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02,
    0x01, 0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03,
    0x42, 0x00, 0x04, 0x60, 0xd7, 0x9d, 0x39, 0x60, 0xfb, 0x10, 0xd4, 0x28,
    0x89, 0x09, 0x56, 0x4f, 0xfd, 0xa8, 0x47, 0xe2, 0x22, 0xfd, 0x8d, 0x3a,
    0x24, 0x07, 0x7b, 0x38, 0x0d, 0xc3, 0x70, 0x4e, 0x37, 0x42, 0x08, 0x1b,
    0x33, 0xc6, 0xec, 0x47, 0xd0, 0xa8, 0xfb, 0xcf, 0xad, 0x3f, 0xdc, 0x7c,
    0x6e, 0xcd, 0x94, 0x7a, 0x4c, 0x1e, 0x90, 0x63, 0xd0, 0x7f, 0xe4, 0x20,
    0xa7, 0xab, 0x14, 0xd5, 0x92, 0xb6, 0xc0, 0xa3, 0x7d, 0x30, 0x7b, 0x30,
    0x1d, 0x06, 0x03, 0x55, 0x1d, 0x0e, 0x04, 0x16, 0x04, 0x14, 0xca, 0x05,
    0x33, 0xd7, 0x4f, 0xc4, 0x7f, 0x09, 0x49, 0xfb, 0xdb, 0x12, 0x25, 0xdf,
    0xd7, 0x97, 0x9d, 0x41, 0x1e, 0x15, 0x30, 0x0e, 0x06, 0x03, 0x55, 0x1d,
    0x0f, 0x01, 0x01, 0xff, 0x04, 0x04, 0x03, 0x02, 0x00, 0x04, 0x30, 0x12,
    0x06, 0x03, 0x55, 0x1d, 0x13, 0x01, 0x01, 0xff, 0x04, 0x08, 0x30, 0x06,
    0x01, 0x01, 0xff, 0x02, 0x01, 0x00, 0x30, 0x15, 0x06, 0x03, 0x55, 0x1d,
    0x20, 0x04, 0x0e, 0x30, 0x0c, 0x30, 0x0a, 0x06, 0x08, 0x2a, 0x82, 0x14,
    0x00, 0x44, 0x01, 0x14, 0x01, 0x30, 0x1f, 0x06, 0x03, 0x55, 0x1d, 0x23,
    0x04, 0x18, 0x30, 0x16, 0x80, 0x14, 0xb4, 0x18, 0x85, 0xc8, 0x4a, 0x4a,
    0xc5, 0x12, 0x7a, 0xf2, 0x40, 0x39, 0xde, 0xc4, 0xf5, 0x8b, 0x1e, 0x7e,
    0x4a, 0xd1, 0x30, 0x0a, 0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04,
    0x03, 0x03, 0x03, 0x68, 0x00, 0x30, 0x65, 0x02, 0x31, 0x00, 0xd2, 0x21,
    0x49, 0xc3, 0x46, 0x70, 0x4b, 0x16, 0x85, 0x9e, 0xf2, 0x92, 0x6d, 0x0c,
    0xd2, 0xb8, 0x74, 0x4f, 0xdd, 0x12, 0x61, 0x78, 0x45, 0x9b, 0x54, 0x31,
    0xd2, 0x9d, 0x50, 0x4a, 0xdd, 0x5c, 0xfe, 0xf7, 0x54, 0x12, 0xb8, 0x03,
    0xc2, 0x11, 0x21, 0x95, 0x53, 0xfc, 0x30, 0x39, 0x00, 0xd6, 0x02, 0x30,
    0x13, 0x62, 0x98, 0x1f, 0xe7, 0x64, 0x4c, 0x89, 0xef, 0xf0, 0xe7, 0x83,
    0xeb, 0x71, 0x5c, 0xa1, 0xae, 0x47, 0xf7, 0xe7, 0xfb, 0x7e, 0x70, 0xa8,
    0xdf, 0x28, 0x04, 0x14, 0x42, 0x47, 0x66, 0x70, 0x62, 0x22, 0x1d, 0xbf,
    0xf3, 0xe6, 0xb3, 0x5e, 0x23, 0xcb, 0x29, 0x32, 0xde, 0xea, 0xb5, 0x8e,
];

/// "Infineon OPTIGA(TM) Trust X Test CA 000": self-signed P-256 CA used
/// for test devices.
pub const OPTIGA_TRUST_TEST_CA: [u8; 614] = [
    0x30, 0x82, 0x02, 0x62, 0x30, 0x82, 0x02, 0x08, 0xa0, 0x03, 0x02, 0x01,
    0x02, 0x02, 0x09, 0x00, 0xc6, 0x40, 0x14, 0x6a, 0x1d, 0xda, 0xfe, 0x46,
    0x30, 0x0a, 0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x02,
    0x30, 0x77, 0x31, 0x0b, 0x30, 0x09, 0x06, 0x03, 0x55, 0x04, 0x06, 0x13,
    0x02, 0x44, 0x45, 0x31, 0x21, 0x30, 0x1f, 0x06, 0x03, 0x55, 0x04, 0x0a,
    0x0c, 0x18, 0x49, 0x6e, 0x66, 0x69, 0x6e, 0x65, 0x6f, 0x6e, 0x20, 0x54,
    0x65, 0x63, 0x68, 0x6e, 0x6f, 0x6c, 0x6f, 0x67, 0x69, 0x65, 0x73, 0x20,
    0x41, 0x47, 0x31, 0x13, 0x30, 0x11, 0x06, 0x03, 0x55, 0x04, 0x0b, 0x0c,
    0x0a, 0x4f, 0x50, 0x54, 0x49, 0x47, 0x41, 0x28, 0x54, 0x4d, 0x29, 0x31,
    0x30, 0x30, 0x2e, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0c, 0x27, 0x49, 0x6e,
    0x66, 0x69, 0x6e, 0x65, 0x6f, 0x6e, 0x20, 0x4f, 0x50, 0x54, 0x49, 0x47,
    0x41, 0x28, 0x54, 0x4d, 0x29, 0x20, 0x54, 0x72, 0x75, 0x73, 0x74, 0x20,
    0x58, 0x20, 0x54, 0x65, 0x73, 0x74, 0x20, 0x43, 0x41, 0x20, 0x30, 0x30,
    0x30, 0x30, 0x1e, 0x17, 0x0d, 0x31, 0x36, 0x30, 0x35, 0x31, 0x30, 0x32,
    0x30, 0x31, 0x38, 0x33, 0x30, 0x5a, 0x17, 0x0d, 0x34, 0x31, 0x30, 0x35,
    0x30, 0x34, 0x32, 0x30, 0x31, 0x38, 0x33, 0x30, 0x5a, 0x30, 0x77, 0x31,
    0x0b, 0x30, 0x09, 0x06, 0x03, 0x55, 0x04, 0x06, 0x13, 0x02, 0x44, 0x45,
    0x31, 0x21, 0x30, 0x1f, 0x06, 0x03, 0x55, 0x04, 0x0a, 0x0c, 0x18, 0x49,
    0x6e, 0x66, 0x69, 0x6e, 0x65, 0x6f, 0x6e, 0x20, 0x54, 0x65, 0x63, 0x68,
    0x6e, 0x6f, 0x6c, 0x6f, 0x67, 0x69, 0x65, 0x73, 0x20, 0x41, 0x47, 0x31,
    0x13, 0x30, 0x11, 0x06, 0x03, 0x55, 0x04, 0x0b, 0x0c, 0x0a, 0x4f, 0x50,
    0x54, 0x49, 0x47, 0x41, 0x28, 0x54, 0x4d, 0x29, 0x31, 0x30, 0x30, 0x2e,
    0x06, 0x03, 0x55, 0x04, 0x03, 0x0c, 0x27, 0x49, 0x6e, 0x66, 0x69, 0x6e,
    0x65, 0x6f, 0x6e, 0x20, 0x4f, 0x50, 0x54, 0x49, 0x47, 0x41, 0x28, 0x54,
    0x4d, 0x29, 0x20, 0x54, 0x72, 0x75, 0x73, 0x74, 0x20, 0x58, 0x20, 0x54,
    0x65, 0x73, 0x74, 0x20, 0x43, 0x41, 0x20, 0x30, 0x30, 0x30, 0x30, 0x59,
    0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06,
    0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00,
    0x04, 0x94, 0x89, 0x2f, 0x09, 0xea, 0x4e, 0xca, 0xbc, 0x6a, 0x4e, 0xf2,
    0x06, 0x36, 0x26, 0xe0, 0x5d, 0xe0, 0xd5, 0xf9, 0x77, 0xea, 0xc3, 0xb2,
    0x70, 0xac, 0xe2, 0x19, 0x00, 0xf5, 0xdb, 0x56, 0xe7, 0x37, 0xbb, 0xbe,
    0x46, 0xe4, 0x49, 0x76, 0x38, 0x25, 0xb5, 0xf8, 0x94, 0x74, 0x9e, 0x1a,
    0xb6, 0x5a, 0xf1, 0x29, 0xd7, 0x3a, 0xb6, 0x9b, 0x80, 0xac, 0xc5, 0xe1,
    0xc3, 0x10, 0xf2, 0x16, 0xc6, 0xa3, 0x7d, 0x30, 0x7b, 0x30, 0x1d, 0x06,
    0x03, 0x55, 0x1d, 0x0e, 0x04, 0x16, 0x04, 0x14, 0x42, 0xe3, 0x5d, 0x56,
    0xe5, 0x6c, 0x8e, 0x8d, 0x02, 0x71, 0x8c, 0x9e, 0xf2, 0x33, 0xc9, 0x47,
    0x3b, 0x82, 0x53, 0x6c, 0x30, 0x1f, 0x06, 0x03, 0x55, 0x1d, 0x23, 0x04,
    0x18, 0x30, 0x16, 0x80, 0x14, 0x42, 0xe3, 0x5d, 0x56, 0xe5, 0x6c, 0x8e,
    0x8d, 0x02, 0x71, 0x8c, 0x9e, 0xf2, 0x33, 0xc9, 0x47, 0x3b, 0x82, 0x53,
    0x6c, 0x30, 0x12, 0x06, 0x03, 0x55, 0x1d, 0x13, 0x01, 0x01, 0xff, 0x04,
    0x08, 0x30, 0x06, 0x01, 0x01, 0xff, 0x02, 0x01, 0x00, 0x30, 0x0e, 0x06,
    0x03, 0x55, 0x1d, 0x0f, 0x01, 0x01, 0xff, 0x04, 0x04, 0x03, 0x02, 0x02,
    0x04, 0x30, 0x15, 0x06, 0x03, 0x55, 0x1d, 0x20, 0x04, 0x0e, 0x30, 0x0c,
    0x30, 0x0a, 0x06, 0x08, 0x2a, 0x82, 0x14, 0x00, 0x44, 0x01, 0x14, 0x01,
    0x30, 0x0a, 0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x02,
    0x03, 0x48, 0x00, 0x30, 0x45, 0x02, 0x21, 0x00, 0xf5, 0xf3, 0x2b, 0x5b,
    0x93, 0x09, 0x92, 0x90, 0x2c, 0xa4, 0x5f, 0x74, 0x56, 0xc1, 0x24, 0xbb,
    0x2b, 0x9c, 0xe4, 0x4f, 0xc7, 0xf0, 0xf1, 0x6c, 0x3f, 0x5f, 0x81, 0x53,
    0x9f, 0x09, 0x77, 0x98, 0x02, 0x20, 0x51, 0xb0, 0x82, 0x77, 0x85, 0x06,
    0x77, 0xde, 0xef, 0x3d, 0x49, 0x21, 0xb7, 0x92, 0x1d, 0x87, 0xb5, 0xc2,
    0x92, 0x6d, 0x91, 0x07, 0x9d, 0x02, 0xea, 0x63, 0x1c, 0xa8, 0xe9, 0x91,
    0x25, 0xa6,
];
