use openexrt::{Client, Options};

fn main() {
	let app_id = std::env::args().nth(1).unwrap();
	let client = Client::new(Options::default().app_id(app_id)).unwrap();
	match client.latest().unwrap().into_result() {
		Ok(rates) => {
			for (currency, value) in rates.iter() {
				println!("{currency}, {value}");
			}
		}
		Err(failure) => eprintln!("{failure}"),
	}
}
