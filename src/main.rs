use log::{debug, info};

use leaplist::{SkipList, Vector};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let mut list: SkipList<u32, u32> = SkipList::default();

    let mut key = 50;
    while key > 0 {
        list.insert(key, key * 2);
        key -= 1;
    }
    info!(
        "{} entries spread over {} of {} levels",
        list.len(),
        list.level(),
        list.max_level()
    );
    debug!("{}", list);

    let key = 3;
    info!("get({}) = {:?}", key, list.get(&key));
    info!("remove({}) = {:?}", key, list.remove(&key));
    info!("get({}) = {:?}", key, list.get(&key));

    let mut smallest: Vector<u32> = Vector::new();
    smallest.extend(list.keys().take(8).copied());
    info!("smallest keys after removal: {:?}", smallest);
}
