//! Mobile network operators and their display names.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Isp {
    Mobile,
    Telecom,
    Unicom,
}

impl Isp {
    pub const ALL: [Isp; 3] = [Isp::Mobile, Isp::Telecom, Isp::Unicom];

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Isp::Mobile),
            2 => Some(Isp::Telecom),
            3 => Some(Isp::Unicom),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Isp::Mobile => 1,
            Isp::Telecom => 2,
            Isp::Unicom => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Isp::Mobile => "移动",
            Isp::Telecom => "电信",
            Isp::Unicom => "联通",
        }
    }
}

impl fmt::Display for Isp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Render a comma-separated code list such as `"1,2,3"` as `移动、电信、联通`.
/// Unknown codes are kept verbatim.
pub fn format_isp(codes: &str) -> String {
    if codes.trim().is_empty() {
        return String::new();
    }
    codes
        .split(',')
        .map(|raw| {
            let code = raw.trim();
            code.parse()
                .ok()
                .and_then(Isp::from_code)
                .map(|isp| isp.label().to_string())
                .unwrap_or_else(|| code.to_string())
        })
        .collect::<Vec<_>>()
        .join("、")
}
