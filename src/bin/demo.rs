use curlreq::{CurlConfig, curl_to_request};

fn main() {
    env_logger::init();

    let curl_command = "curl 'http://example.com' -H 'Accept: application/json' -u 'me:secret' --compressed";
    match curl_to_request(curl_command, &CurlConfig::default()) {
        Ok(translation) => println!("{:#?}", translation.request),
        Err(e) => eprintln!("Error parsing curl command: {e}"),
    }
}
