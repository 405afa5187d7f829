//! Each layer of a small service re-raises what it received under its own
//! operation name, and the HTTP edge resolves the final answer.

use errchain::{ErrorChain, ErrorCode, ErrorOptions, Result, ResultExt};
use std::collections::HashMap;
use std::io;

struct Store {
    rows: HashMap<u64, String>,
    online: bool,
}

impl Store {
    fn get(&self, id: u64) -> Result<&str> {
        if !self.online {
            let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
            return Err::<&str, io::Error>(refused).wrap_op("store::connect");
        }
        self.rows.get(&id).map(String::as_str).ok_or_else(|| {
            ErrorChain::with_options(
                ErrorCode::NotFound,
                format!("user {id} does not exist"),
                ErrorOptions::new().with_operation("store::get"),
            )
        })
    }
}

fn find_user(store: &Store, id: u64) -> Result<String> {
    store.get(id).map(str::to_owned).wrap_op("users::find")
}

fn handle(store: &Store, id: u64) -> (u16, String) {
    match find_user(store, id).wrap_op("http::get_user") {
        Ok(name) => (200, name),
        Err(err) => {
            err.with_log(|log| {
                let mut line = String::new();
                if log.write_to(&mut line).is_ok() {
                    eprintln!("{line}");
                }
            });
            (err.http_status().as_u16(), err.resolved_message().to_owned())
        }
    }
}

fn main() {
    let mut store = Store {
        rows: HashMap::from([(1, "ada".to_owned())]),
        online: true,
    };

    println!("{:?}", handle(&store, 1));
    println!("{:?}", handle(&store, 2));

    store.online = false;
    println!("{:?}", handle(&store, 1));
}
