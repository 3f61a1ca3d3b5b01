#![allow(dead_code)]

use std::io::Write;

pub const STATIONS_CONF: &str = r#"
# Station configuration
; general format: variableName, variableComment = value, valueComment

baseline, baseline between receivers = 13.434510, kilometers
tolerance, allowed difference between time stamps = 1.5, secs
reportExceptions = TRUE

[ONSA]
name, 4-char station name = ONSA
staX, X station coordinate = 3370658.5419, meters
staY, Y station coordinate =  711877.1496, meters
staZ, Z station coordinate = 5349786.9542, meters
antennaType : AOAD/M_B   # ':' works as well as '='

[BELL]
reference = TRUE

[ROVER]
speed = 0.223 , m/s

[ONSA]
sampling, sampling period = 30, s
"#;

pub fn write_temp_conf(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
