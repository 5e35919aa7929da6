use crate::{models::Post, store::PostStore};
use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

const DEMO_POSTS: &[(&str, &str, &str, &str)] = &[
    (
        "某互联网公司",
        "beijing",
        "北京",
        "长期996，加班没有加班费，周末经常被临时叫回公司开会。",
    ),
    (
        "某电商平台",
        "shanghai",
        "上海",
        "大促期间连续两周每天工作到凌晨，调休申请一直被拒绝。",
    ),
    (
        "某金融科技公司",
        "shenzhen",
        "深圳",
        "试用期最后一天被通知不合格，理由含糊，工资还拖了半个月才发。",
    ),
    (
        "某游戏公司",
        "hangzhou",
        "杭州",
        "项目上线前强制全员封闭开发，晚上十点前不允许打卡下班。",
    ),
    (
        "某教育科技公司",
        "chengdu",
        "成都",
        "裁员时不给补偿，要求员工主动提交离职申请才肯结清工资。",
    ),
];

/// Inserts a fixed set of example posts, spread over the past few days.
pub fn seed_demo_posts(store: &PostStore) {
    let now = Utc::now();

    for (i, (company, city_code, city_name, content)) in DEMO_POSTS.iter().enumerate() {
        let age = Duration::hours(12 * (DEMO_POSTS.len() - i) as i64);
        store.insert(Post {
            id: Uuid::new_v4(),
            company: company.to_string(),
            city_code: city_code.to_string(),
            city_name: city_name.to_string(),
            content: content.to_string(),
            occurred_at: Some((now - age - Duration::days(7)).timestamp()),
            created_at: (now - age).timestamp(),
        });
    }

    info!("Seeded {} demo posts", DEMO_POSTS.len());
}
