use std::time::{Duration, Instant};

pub struct Framepacer {
    frame_start: Instant,
    average: f32,
}

impl Framepacer {
    const SMOOTHING: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
            average: 0.0,
        }
    }

    pub fn frametime(&self) -> f32 {
        self.frame_start.elapsed().as_secs_f32()
    }

    pub fn framerate(&self) -> f32 {
        if self.average > f32::EPSILON {
            1.0 / self.average
        } else {
            0.0
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Sleeps out the rest of the frame when a limit is given.
    pub fn end_frame(&mut self, framerate: Option<u32>) {
        if let Some(limit) = framerate.filter(|&f| f > 0) {
            const ACCURACY: f32 = 0.0001; // 100 microseconds
            let limit_frametime = 1.0 / limit as f32;
            let sleep_time = limit_frametime - self.frametime() - ACCURACY;

            if sleep_time > 0.0 {
                std::thread::sleep(Duration::from_secs_f32(sleep_time));

                while self.frametime() < limit_frametime {
                    std::thread::yield_now();
                }
            }
        }

        let frametime = self.frametime();
        self.average = if self.average > 0.0 {
            self.average + (frametime - self.average) * Self::SMOOTHING
        } else {
            frametime
        };
    }
}
