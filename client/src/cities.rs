/// A selectable city: canonical code plus display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub code: &'static str,
    pub name: &'static str,
}

pub const CITIES: &[City] = &[
    City { code: "beijing", name: "北京" },
    City { code: "shanghai", name: "上海" },
    City { code: "guangzhou", name: "广州" },
    City { code: "shenzhen", name: "深圳" },
    City { code: "hangzhou", name: "杭州" },
    City { code: "chengdu", name: "成都" },
    City { code: "wuhan", name: "武汉" },
    City { code: "nanjing", name: "南京" },
    City { code: "xian", name: "西安" },
    City { code: "chongqing", name: "重庆" },
];

pub fn find(code: &str) -> Option<&'static City> {
    CITIES.iter().find(|city| city.code == code)
}

/// Display name for `code`, or the code itself when it is not in the table.
pub fn city_name(code: &str) -> &str {
    find(code).map_or(code, |city| city.name)
}
