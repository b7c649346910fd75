//! PostgreSQL type OIDs understood by the default catalog.
//!
//! Reference: https://github.com/postgres/postgres/blob/master/src/include/catalog/pg_type.dat

// Boolean
pub const BOOL: u32 = 16;

// Bytes
pub const BYTEA: u32 = 17;

// Characters
pub const CHAR: u32 = 18;
pub const NAME: u32 = 19;
pub const TEXT: u32 = 25;
pub const BPCHAR: u32 = 1042; // blank-padded char
pub const VARCHAR: u32 = 1043;

// Integers
pub const INT8: u32 = 20;
pub const INT2: u32 = 21;
pub const INT4: u32 = 23;
pub const OID: u32 = 26;

// JSON and XML
pub const JSON: u32 = 114;
pub const XML: u32 = 142;
pub const JSONB: u32 = 3802;

// Geometry
pub const POINT: u32 = 600;
pub const LSEG: u32 = 601;
pub const PATH: u32 = 602;
pub const BOX: u32 = 603;
pub const POLYGON: u32 = 604;
pub const LINE: u32 = 628;
pub const CIRCLE: u32 = 718;

// Float
pub const FLOAT4: u32 = 700;
pub const FLOAT8: u32 = 701;

// Money and numeric
pub const MONEY: u32 = 790;
pub const NUMERIC: u32 = 1700;

// Network
pub const CIDR: u32 = 650;
pub const MACADDR8: u32 = 774;
pub const MACADDR: u32 = 829;
pub const INET: u32 = 869;

// Date/Time
pub const DATE: u32 = 1082;
pub const TIME: u32 = 1083;
pub const TIMESTAMP: u32 = 1114;
pub const TIMESTAMPTZ: u32 = 1184;
pub const INTERVAL: u32 = 1186;
pub const TIMETZ: u32 = 1266;

// UUID
pub const UUID: u32 = 2950;

// Arrays
pub const JSON_ARRAY: u32 = 199;
pub const XML_ARRAY: u32 = 143;
pub const CIDR_ARRAY: u32 = 651;
pub const MACADDR8_ARRAY: u32 = 775;
pub const MONEY_ARRAY: u32 = 791;
pub const BOOL_ARRAY: u32 = 1000;
pub const BYTEA_ARRAY: u32 = 1001;
pub const CHAR_ARRAY: u32 = 1002;
pub const NAME_ARRAY: u32 = 1003;
pub const INT2_ARRAY: u32 = 1005;
pub const INT4_ARRAY: u32 = 1007;
pub const TEXT_ARRAY: u32 = 1009;
pub const BPCHAR_ARRAY: u32 = 1014;
pub const VARCHAR_ARRAY: u32 = 1015;
pub const INT8_ARRAY: u32 = 1016;
pub const POINT_ARRAY: u32 = 1017;
pub const BOX_ARRAY: u32 = 1020;
pub const FLOAT4_ARRAY: u32 = 1021;
pub const FLOAT8_ARRAY: u32 = 1022;
pub const OID_ARRAY: u32 = 1028;
pub const MACADDR_ARRAY: u32 = 1040;
pub const INET_ARRAY: u32 = 1041;
pub const TIMESTAMP_ARRAY: u32 = 1115;
pub const DATE_ARRAY: u32 = 1182;
pub const TIME_ARRAY: u32 = 1183;
pub const TIMESTAMPTZ_ARRAY: u32 = 1185;
pub const INTERVAL_ARRAY: u32 = 1187;
pub const NUMERIC_ARRAY: u32 = 1231;
pub const TIMETZ_ARRAY: u32 = 1270;
pub const UUID_ARRAY: u32 = 2951;
pub const JSONB_ARRAY: u32 = 3807;
