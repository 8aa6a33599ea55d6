use ddd_base::value_object::ValueObject;
use ddd_base_macros::value_object;

#[value_object]
struct Amount {
    value: i64,
    note: Option<String>,
}

#[value_object(debug = false)]
struct NonDebugVO(i32);

#[value_object]
#[derive(Default)]
enum Level {
    #[default]
    Low,
    High,
}

#[value_object]
struct Reading {
    celsius: i32,
    #[value_object(skip)]
    sensor: String,
}

#[value_object]
struct Wrapper<T>(T);

#[value_object]
enum Choice<T> {
    One(T),
    Other,
}

fn main() {
    // Debug 默认开启，应可格式化
    let a = Amount { value: 0, note: None };
    let _ = format!("{:?}", a);

    // Clone/PartialEq/Hash 可用
    let _b = a.clone();
    let _eq = a == Amount { value: 0, note: None };
    let _components = a.equality_components().len();

    // debug = false 时只做构造
    let _ = NonDebugVO(1) == NonDebugVO(1);

    let _lv: Level = Default::default();
    let _ = Level::High.value_hash();

    let r = Reading { celsius: 20, sensor: "a".into() };
    let _ = r == Reading { celsius: 20, sensor: "b".into() };

    let _ = Wrapper(1_u8) == Wrapper(1_u8);
    let _ = Choice::One(String::from("a")).value_hash() == Choice::<String>::Other.value_hash();
}
