// crates/worldmap-core/src/names.rs

//! # Region Name Tables
//!
//! Static lookup tables joining the canonical English names of the boundary
//! data with their localized (Simplified Chinese) names and ISO 3166-1
//! alpha-2 codes. All three directions are derived from one slice:
//!
//! - English → localized
//! - localized → English
//! - country code → English
//!
//! The English spellings follow the boundary FeatureCollection
//! (`properties.name`), which is why e.g. "United States of America" and
//! "Republic of Serbia" appear instead of the short forms.

use crate::region::RegionKind;
use crate::text::{BilingualName, Query};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One row of the name table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryName {
    /// Upper-case ISO2 code, empty when the region has none.
    pub iso2: &'static str,
    pub english: &'static str,
    pub localized: &'static str,
    pub kind: RegionKind,
}

impl BilingualName for CountryName {
    fn english_name(&self) -> &str {
        self.english
    }
    fn localized_name(&self) -> Option<&str> {
        Some(self.localized)
    }
}

const fn c(iso2: &'static str, english: &'static str, localized: &'static str) -> CountryName {
    CountryName {
        iso2,
        english,
        localized,
        kind: RegionKind::Country,
    }
}

const fn t(iso2: &'static str, english: &'static str, localized: &'static str) -> CountryName {
    CountryName {
        iso2,
        english,
        localized,
        kind: RegionKind::Territory,
    }
}

/// The master table. Order is the order local search reports matches in.
pub static COUNTRY_NAMES: &[CountryName] = &[
    c("AF", "Afghanistan", "阿富汗"),
    c("AO", "Angola", "安哥拉"),
    c("AL", "Albania", "阿尔巴尼亚"),
    c("AE", "United Arab Emirates", "阿联酋"),
    c("AR", "Argentina", "阿根廷"),
    c("AM", "Armenia", "亚美尼亚"),
    t("AQ", "Antarctica", "南极洲"),
    t("TF", "French Southern and Antarctic Lands", "法属南部和南极领地"),
    c("AU", "Australia", "澳大利亚"),
    c("AT", "Austria", "奥地利"),
    c("AZ", "Azerbaijan", "阿塞拜疆"),
    c("BI", "Burundi", "布隆迪"),
    c("BE", "Belgium", "比利时"),
    c("BJ", "Benin", "贝宁"),
    c("BF", "Burkina Faso", "布基纳法索"),
    c("BD", "Bangladesh", "孟加拉国"),
    c("BG", "Bulgaria", "保加利亚"),
    c("BS", "The Bahamas", "巴哈马"),
    c("BA", "Bosnia and Herzegovina", "波斯尼亚和黑塞哥维那"),
    c("BY", "Belarus", "白俄罗斯"),
    c("BZ", "Belize", "伯利兹"),
    t("BM", "Bermuda", "百慕大"),
    c("BO", "Bolivia", "玻利维亚"),
    c("BR", "Brazil", "巴西"),
    c("BN", "Brunei", "文莱"),
    c("BT", "Bhutan", "不丹"),
    c("BW", "Botswana", "博茨瓦纳"),
    c("CF", "Central African Republic", "中非共和国"),
    c("CA", "Canada", "加拿大"),
    c("CH", "Switzerland", "瑞士"),
    c("CL", "Chile", "智利"),
    c("CN", "China", "中国"),
    c("CI", "Ivory Coast", "科特迪瓦"),
    c("CM", "Cameroon", "喀麦隆"),
    c("CD", "Democratic Republic of the Congo", "刚果民主共和国"),
    c("CG", "Republic of the Congo", "刚果共和国"),
    c("CO", "Colombia", "哥伦比亚"),
    c("CR", "Costa Rica", "哥斯达黎加"),
    c("CU", "Cuba", "古巴"),
    t("", "Northern Cyprus", "北塞浦路斯"),
    c("CY", "Cyprus", "塞浦路斯"),
    c("CZ", "Czech Republic", "捷克"),
    c("DE", "Germany", "德国"),
    c("DJ", "Djibouti", "吉布提"),
    c("DK", "Denmark", "丹麦"),
    c("DO", "Dominican Republic", "多米尼加共和国"),
    c("DZ", "Algeria", "阿尔及利亚"),
    c("EC", "Ecuador", "厄瓜多尔"),
    c("EG", "Egypt", "埃及"),
    c("ER", "Eritrea", "厄立特里亚"),
    c("ES", "Spain", "西班牙"),
    c("EE", "Estonia", "爱沙尼亚"),
    c("ET", "Ethiopia", "埃塞俄比亚"),
    c("FI", "Finland", "芬兰"),
    c("FJ", "Fiji", "斐济"),
    t("FK", "Falkland Islands", "福克兰群岛"),
    c("FR", "France", "法国"),
    c("GA", "Gabon", "加蓬"),
    c("GB", "United Kingdom", "英国"),
    c("GE", "Georgia", "格鲁吉亚"),
    c("GH", "Ghana", "加纳"),
    c("GN", "Guinea", "几内亚"),
    c("GM", "Gambia", "冈比亚"),
    c("GW", "Guinea Bissau", "几内亚比绍"),
    c("GQ", "Equatorial Guinea", "赤道几内亚"),
    c("GR", "Greece", "希腊"),
    t("GL", "Greenland", "格陵兰"),
    c("GT", "Guatemala", "危地马拉"),
    t("GF", "French Guiana", "法属圭亚那"),
    c("GY", "Guyana", "圭亚那"),
    c("HN", "Honduras", "洪都拉斯"),
    c("HR", "Croatia", "克罗地亚"),
    c("HT", "Haiti", "海地"),
    c("HU", "Hungary", "匈牙利"),
    c("ID", "Indonesia", "印度尼西亚"),
    c("IN", "India", "印度"),
    c("IE", "Ireland", "爱尔兰"),
    c("IR", "Iran", "伊朗"),
    c("IQ", "Iraq", "伊拉克"),
    c("IS", "Iceland", "冰岛"),
    c("IL", "Israel", "以色列"),
    c("IT", "Italy", "意大利"),
    c("JM", "Jamaica", "牙买加"),
    c("JO", "Jordan", "约旦"),
    c("JP", "Japan", "日本"),
    c("KZ", "Kazakhstan", "哈萨克斯坦"),
    c("KE", "Kenya", "肯尼亚"),
    c("KG", "Kyrgyzstan", "吉尔吉斯斯坦"),
    c("KH", "Cambodia", "柬埔寨"),
    c("KR", "South Korea", "韩国"),
    t("XK", "Kosovo", "科索沃"),
    c("KW", "Kuwait", "科威特"),
    c("LA", "Laos", "老挝"),
    c("LB", "Lebanon", "黎巴嫩"),
    c("LR", "Liberia", "利比里亚"),
    c("LY", "Libya", "利比亚"),
    c("LK", "Sri Lanka", "斯里兰卡"),
    c("LS", "Lesotho", "莱索托"),
    c("LT", "Lithuania", "立陶宛"),
    c("LU", "Luxembourg", "卢森堡"),
    c("LV", "Latvia", "拉脱维亚"),
    c("MA", "Morocco", "摩洛哥"),
    c("MD", "Moldova", "摩尔多瓦"),
    c("MG", "Madagascar", "马达加斯加"),
    c("MX", "Mexico", "墨西哥"),
    c("MK", "Macedonia", "北马其顿"),
    c("ML", "Mali", "马里"),
    c("MM", "Myanmar", "缅甸"),
    c("ME", "Montenegro", "黑山"),
    c("MN", "Mongolia", "蒙古"),
    c("MZ", "Mozambique", "莫桑比克"),
    c("MR", "Mauritania", "毛里塔尼亚"),
    c("MW", "Malawi", "马拉维"),
    c("MY", "Malaysia", "马来西亚"),
    c("NA", "Namibia", "纳米比亚"),
    t("NC", "New Caledonia", "新喀里多尼亚"),
    c("NE", "Niger", "尼日尔"),
    c("NG", "Nigeria", "尼日利亚"),
    c("NI", "Nicaragua", "尼加拉瓜"),
    c("NL", "Netherlands", "荷兰"),
    c("NO", "Norway", "挪威"),
    c("NP", "Nepal", "尼泊尔"),
    c("NZ", "New Zealand", "新西兰"),
    c("OM", "Oman", "阿曼"),
    c("PK", "Pakistan", "巴基斯坦"),
    c("PA", "Panama", "巴拿马"),
    c("PE", "Peru", "秘鲁"),
    c("PH", "Philippines", "菲律宾"),
    c("PG", "Papua New Guinea", "巴布亚新几内亚"),
    c("PL", "Poland", "波兰"),
    t("PR", "Puerto Rico", "波多黎各"),
    c("KP", "North Korea", "朝鲜"),
    c("PT", "Portugal", "葡萄牙"),
    c("PY", "Paraguay", "巴拉圭"),
    c("QA", "Qatar", "卡塔尔"),
    c("RO", "Romania", "罗马尼亚"),
    c("RU", "Russia", "俄罗斯"),
    c("RW", "Rwanda", "卢旺达"),
    t("EH", "Western Sahara", "西撒哈拉"),
    c("SA", "Saudi Arabia", "沙特阿拉伯"),
    c("SD", "Sudan", "苏丹"),
    c("SS", "South Sudan", "南苏丹"),
    c("SN", "Senegal", "塞内加尔"),
    c("SB", "Solomon Islands", "所罗门群岛"),
    c("SL", "Sierra Leone", "塞拉利昂"),
    c("SV", "El Salvador", "萨尔瓦多"),
    t("", "Somaliland", "索马里兰"),
    c("SO", "Somalia", "索马里"),
    c("RS", "Republic of Serbia", "塞尔维亚"),
    c("SR", "Suriname", "苏里南"),
    c("SK", "Slovakia", "斯洛伐克"),
    c("SI", "Slovenia", "斯洛文尼亚"),
    c("SE", "Sweden", "瑞典"),
    c("SZ", "Swaziland", "斯威士兰"),
    c("SY", "Syria", "叙利亚"),
    c("TD", "Chad", "乍得"),
    c("TG", "Togo", "多哥"),
    c("TH", "Thailand", "泰国"),
    c("TJ", "Tajikistan", "塔吉克斯坦"),
    c("TM", "Turkmenistan", "土库曼斯坦"),
    c("TL", "East Timor", "东帝汶"),
    c("TT", "Trinidad and Tobago", "特立尼达和多巴哥"),
    c("TN", "Tunisia", "突尼斯"),
    c("TR", "Turkey", "土耳其"),
    t("TW", "Taiwan", "台湾"),
    c("TZ", "United Republic of Tanzania", "坦桑尼亚"),
    c("UG", "Uganda", "乌干达"),
    c("UA", "Ukraine", "乌克兰"),
    c("UY", "Uruguay", "乌拉圭"),
    c("US", "United States of America", "美国"),
    c("UZ", "Uzbekistan", "乌兹别克斯坦"),
    c("VE", "Venezuela", "委内瑞拉"),
    c("VN", "Vietnam", "越南"),
    c("VU", "Vanuatu", "瓦努阿图"),
    t("", "West Bank", "约旦河西岸"),
    c("YE", "Yemen", "也门"),
    c("ZA", "South Africa", "南非"),
    c("ZM", "Zambia", "赞比亚"),
    c("ZW", "Zimbabwe", "津巴布韦"),
    // Regions without polygons in the boundary data (see `manual`)
    c("SG", "Singapore", "新加坡"),
    c("BH", "Bahrain", "巴林"),
    c("MV", "Maldives", "马尔代夫"),
    t("PS", "Palestine", "巴勒斯坦"),
    c("MC", "Monaco", "摩纳哥"),
    t("VA", "Vatican", "梵蒂冈"),
    c("SM", "San Marino", "圣马力诺"),
    c("MT", "Malta", "马耳他"),
    c("LI", "Liechtenstein", "列支敦士登"),
    c("AD", "Andorra", "安道尔"),
    c("KM", "Comoros", "科摩罗"),
    c("MU", "Mauritius", "毛里求斯"),
    c("SC", "Seychelles", "塞舌尔"),
    c("ST", "Sao Tome and Principe", "圣多美和普林西比"),
    c("CV", "Cabo Verde", "佛得角"),
    c("AG", "Antigua and Barbuda", "安提瓜和巴布达"),
    c("BB", "Barbados", "巴巴多斯"),
    c("DM", "Dominica", "多米尼克"),
    c("GD", "Grenada", "格林纳达"),
    c("KN", "Saint Kitts and Nevis", "圣基茨和尼维斯"),
    c("LC", "Saint Lucia", "圣卢西亚"),
    c("VC", "Saint Vincent and the Grenadines", "圣文森特和格林纳丁斯"),
    c("KI", "Kiribati", "基里巴斯"),
    c("MH", "Marshall Islands", "马绍尔群岛"),
    c("FM", "Micronesia", "密克罗尼西亚"),
    c("NR", "Nauru", "瑙鲁"),
    c("PW", "Palau", "帕劳"),
    c("WS", "Samoa", "萨摩亚"),
    c("TO", "Tonga", "汤加"),
    c("TV", "Tuvalu", "图瓦卢"),
];

static BY_ENGLISH: Lazy<HashMap<&'static str, &'static CountryName>> =
    Lazy::new(|| COUNTRY_NAMES.iter().map(|n| (n.english, n)).collect());

static BY_LOCALIZED: Lazy<HashMap<&'static str, &'static CountryName>> =
    Lazy::new(|| COUNTRY_NAMES.iter().map(|n| (n.localized, n)).collect());

static BY_CODE: Lazy<HashMap<String, &'static CountryName>> = Lazy::new(|| {
    COUNTRY_NAMES
        .iter()
        .filter(|n| !n.iso2.is_empty())
        .map(|n| (n.iso2.to_ascii_lowercase(), n))
        .collect()
});

/// Row for a canonical English name (exact match).
pub fn by_english(english: &str) -> Option<&'static CountryName> {
    BY_ENGLISH.get(english).copied()
}

/// Row for a localized name (exact match).
pub fn by_localized(localized: &str) -> Option<&'static CountryName> {
    BY_LOCALIZED.get(localized).copied()
}

/// Row for an ISO2 code, case-insensitive (`"fr"`, `"FR"`).
pub fn by_code(code: &str) -> Option<&'static CountryName> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    BY_CODE.get(&code.to_ascii_lowercase()).copied()
}

/// Localized name for a canonical English name.
pub fn localized_of(english: &str) -> Option<&'static str> {
    by_english(english).map(|n| n.localized)
}

/// Canonical English name for a localized name.
pub fn english_of(localized: &str) -> Option<&'static str> {
    by_localized(localized).map(|n| n.english)
}

/// `"<localized> (<English>)"` for a canonical name, or the name itself.
pub fn bilingual_name(english: &str) -> String {
    crate::text::bilingual(english, localized_of(english))
}

/// Resolves the country a geocoder reported: the code wins, then an exact
/// English or localized name.
pub fn resolve_country(name: Option<&str>, code: Option<&str>) -> Option<&'static CountryName> {
    if let Some(row) = code.and_then(by_code) {
        return Some(row);
    }
    let name = name?.trim();
    by_english(name).or_else(|| by_localized(name))
}

/// Rows matching the query, English pass first, then localized pass.
pub fn search(query: &Query) -> impl Iterator<Item = &'static CountryName> + '_ {
    let english = COUNTRY_NAMES
        .iter()
        .filter(move |n| query.matches_english(n.english));
    let localized = COUNTRY_NAMES
        .iter()
        .filter(move |n| query.matches_localized(n.localized));
    english.chain(localized)
}
