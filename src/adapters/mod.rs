//! Concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                     | Connects to                 |
//! |-------------|--------------------------------|-----------------------------|
//! | `sim_board` | SensorPort, ActuatorPort,      | In-memory pins and sensors  |
//! |             | DisplayPort, InputPort,        |                             |
//! |             | ClockPort                      | Host clock                  |
//! | `link`      | LinkPort                       | `embassy-sync` inbox        |
//! | `log_sink`  | EventSink                      | `log` output                |
//! | `console`   | (none)                         | stdin → sim inputs / inbox  |

pub mod console;
pub mod link;
pub mod log_sink;
pub mod sim_board;
