use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Subscription, Task, Theme,
};
use lutcore::prelude::WaveformSpec;
use serde::Deserialize;
use std::time::Duration;

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "DAC LUT Visualizer".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Visualizer {
    config: ConfigForm,
    payload: Option<TablePayload>,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    PayloadFetched(Result<TablePayload, String>),
    ConfigFieldChanged(ConfigField, String),
    SubmitConfig,
    ConfigSubmitted(Result<String, String>),
}

#[derive(Debug, Clone, Copy)]
enum ConfigField {
    Length,
    Amplitude,
    DcOffset,
    Phase,
    FullScale,
    ResolutionBits,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                config: ConfigForm::default(),
                payload: None,
                status: "Waiting for table...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_payload(), Message::PayloadFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_payload(), Message::PayloadFetched),
            Message::PayloadFetched(Ok(payload)) => {
                state.status = format!(
                    "Table received: {} codes / {} bits (max code {})",
                    payload.length, payload.resolution_bits, payload.max_code
                );
                state.push_history(format!(
                    "Table: {} codes / {} bits",
                    payload.length, payload.resolution_bits
                ));
                state.payload = Some(payload);
                Task::none()
            }
            Message::PayloadFetched(Err(err)) => {
                state.status = format!("Bridge error: {err}");
                Task::none()
            }
            Message::ConfigFieldChanged(field, value) => {
                state.config.update_field(field, value);
                Task::none()
            }
            Message::SubmitConfig => match state.config.to_spec() {
                Ok(spec) => Task::perform(post_spec(spec), Message::ConfigSubmitted),
                Err(err) => {
                    state.status = format!("Form error: {err}");
                    Task::none()
                }
            },
            Message::ConfigSubmitted(Ok(message)) => {
                state.status = message;
                state.push_history("Spec submitted".into());
                Task::none()
            }
            Message::ConfigSubmitted(Err(err)) => {
                state.status = format!("Spec error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let (real_wave, code_plot, notes) = match &state.payload {
            Some(payload) => (
                RealWave {
                    angles: payload.angles.clone(),
                    values: payload.real_wave.clone(),
                },
                CodePlot {
                    codes: payload.codes.clone(),
                    max_code: payload.max_code,
                },
                payload.notes.clone(),
            ),
            None => (RealWave::default(), CodePlot::default(), Vec::new()),
        };

        let config_column = column![
            text("Waveform Spec").size(26),
            text_input("Length", &state.config.length)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Length, value))
                .padding(6),
            text_input("Amplitude (V)", &state.config.amplitude)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Amplitude, value))
                .padding(6),
            text_input("DC offset (V)", &state.config.dc_offset)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::DcOffset, value))
                .padding(6),
            text_input("Phase (rad)", &state.config.phase)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Phase, value))
                .padding(6),
            text_input("Full scale (V)", &state.config.full_scale)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::FullScale, value))
                .padding(6),
            text_input("Resolution (bits)", &state.config.resolution_bits)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::ResolutionBits, value))
                .padding(6),
            button("POST spec")
                .on_press(Message::SubmitConfig)
                .padding(10),
            text(&state.status).size(14),
            column![
                text("Parameter definitions").size(16),
                text("Length: samples per period; the LUT index wraps once per cycle.")
                    .size(12),
                text("Amplitude: peak deviation from the DC offset, in volts.").size(12),
                text("DC offset: vertical shift keeping the wave inside the DAC range.")
                    .size(12),
                text("Phase: starting angle of the first sample, in radians.").size(12),
                text("Full scale: DAC reference voltage the codes are scaled against.")
                    .size(12),
                text("Resolution: DAC bit width; the top code is 2^bits - 1.").size(12),
            ]
            .spacing(4)
            .padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(360.0));

        let table_info = if let Some(payload) = &state.payload {
            text(format!(
                "Codes: {} / max code {}",
                payload.codes.len(),
                payload.max_code
            ))
            .size(18)
        } else {
            text("Codes: n/a").size(18)
        };

        let real_canvas = Canvas::new(real_wave)
            .width(Length::Fill)
            .height(Length::Fixed(260.0));

        let code_canvas = Canvas::new(code_plot)
            .width(Length::Fill)
            .height(Length::Fixed(260.0));

        let notes_list = if notes.is_empty() {
            Column::new().push(text("No validation notes").size(14))
        } else {
            notes
                .iter()
                .fold(Column::new().spacing(4), |col, note| {
                    col.push(text(note.clone()).size(14))
                })
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let plots_column = column![
            text("Generated Table").size(26),
            table_info,
            text("Real waveform vs theta [rad]").size(18),
            real_canvas,
            text("Raw DAC codes vs LUT index").size(18),
            code_canvas,
            text("Validation notes").size(16),
            Container::new(notes_list).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![config_column, plots_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_payload() -> Result<TablePayload, String> {
    let response = reqwest::get("http://127.0.0.1:9000/table")
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<TablePayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_spec(spec: WaveformSpec) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:9000/ingest")
        .json(&spec)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Spec submitted".into())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

#[derive(Debug, Clone)]
struct ConfigForm {
    length: String,
    amplitude: String,
    dc_offset: String,
    phase: String,
    full_scale: String,
    resolution_bits: String,
}

impl ConfigForm {
    fn default() -> Self {
        Self {
            length: "1024".into(),
            amplitude: "0.9".into(),
            dc_offset: "1.0".into(),
            phase: "0.0".into(),
            full_scale: "2.5".into(),
            resolution_bits: "12".into(),
        }
    }

    fn update_field(&mut self, field: ConfigField, value: String) {
        match field {
            ConfigField::Length => self.length = value,
            ConfigField::Amplitude => self.amplitude = value,
            ConfigField::DcOffset => self.dc_offset = value,
            ConfigField::Phase => self.phase = value,
            ConfigField::FullScale => self.full_scale = value,
            ConfigField::ResolutionBits => self.resolution_bits = value,
        }
    }

    fn to_spec(&self) -> Result<WaveformSpec, String> {
        Ok(WaveformSpec {
            length: self
                .length
                .trim()
                .parse()
                .map_err(|_| "length must be a positive integer".to_string())?,
            amplitude: self
                .amplitude
                .trim()
                .parse()
                .map_err(|_| "amplitude must be a number".to_string())?,
            dc_offset: self
                .dc_offset
                .trim()
                .parse()
                .map_err(|_| "DC offset must be a number".to_string())?,
            phase: self
                .phase
                .trim()
                .parse()
                .map_err(|_| "phase must be a number".to_string())?,
            full_scale_voltage: self
                .full_scale
                .trim()
                .parse()
                .map_err(|_| "full scale must be a number".to_string())?,
            resolution_bits: self
                .resolution_bits
                .trim()
                .parse()
                .map_err(|_| "resolution must be 1..=32".to_string())?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TablePayload {
    #[serde(default)]
    length: usize,
    #[serde(default)]
    resolution_bits: u8,
    #[serde(default)]
    max_code: u64,
    #[serde(default)]
    angles: Vec<f64>,
    #[serde(default)]
    real_wave: Vec<f64>,
    #[serde(default)]
    codes: Vec<i64>,
    #[serde(default)]
    notes: Vec<String>,
}

/// Continuous waveform plot: real DAC values against phase angle.
#[derive(Clone, Default)]
struct RealWave {
    angles: Vec<f64>,
    values: Vec<f64>,
}

impl canvas::Program<Message> for RealWave {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        if self.values.len() > 1 && self.angles.len() == self.values.len() {
            let min = self.values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = self
                .values
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            let range = (max - min).max(1e-9);
            let angle_span = self.angles.last().copied().unwrap_or(1.0).max(1e-9);
            let margin = 10.0;
            let plot_width = bounds.width - 2.0 * margin;
            let plot_height = bounds.height - 2.0 * margin;

            let path = Path::new(|builder| {
                for (i, (angle, value)) in self.angles.iter().zip(self.values.iter()).enumerate() {
                    let x = margin + (angle / angle_span) as f32 * plot_width;
                    let normalized = ((value - min) / range) as f32;
                    let y = margin + plot_height - normalized * plot_height;
                    if i == 0 {
                        builder.move_to(Point::new(x, y));
                    } else {
                        builder.line_to(Point::new(x, y));
                    }
                }
            });

            frame.stroke(
                &path,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb(0.89, 0.23, 0.21)),
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Quantized table plot: raw DAC codes against LUT index, with a marker on
/// every sample so quantization steps stay visible at short lengths.
#[derive(Clone, Default)]
struct CodePlot {
    codes: Vec<i64>,
    max_code: u64,
}

impl canvas::Program<Message> for CodePlot {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.02, 0.02, 0.04),
        );

        if !self.codes.is_empty() {
            let top = self
                .codes
                .iter()
                .cloned()
                .max()
                .unwrap_or(0)
                .max(self.max_code as i64)
                .max(1) as f32;
            let bottom = self.codes.iter().cloned().min().unwrap_or(0).min(0) as f32;
            let span = (top - bottom).max(1.0);
            let margin = 10.0;
            let plot_width = bounds.width - 2.0 * margin;
            let plot_height = bounds.height - 2.0 * margin;
            let step = plot_width / (self.codes.len().max(2) as f32 - 1.0);

            // Grey line where the max code sits, so overflowing tables are
            // obvious at a glance.
            let ceiling_y =
                margin + plot_height - ((self.max_code as f32 - bottom) / span) * plot_height;
            let ceiling = Path::new(|builder| {
                builder.move_to(Point::new(margin, ceiling_y));
                builder.line_to(Point::new(margin + plot_width, ceiling_y));
            });
            frame.stroke(
                &ceiling,
                Stroke::default().with_color(Color::from_rgb(0.3, 0.3, 0.35)),
            );

            let line = Path::new(|builder| {
                for (i, &code) in self.codes.iter().enumerate() {
                    let x = margin + i as f32 * step;
                    let y =
                        margin + plot_height - ((code as f32 - bottom) / span) * plot_height;
                    if i == 0 {
                        builder.move_to(Point::new(x, y));
                    } else {
                        builder.line_to(Point::new(x, y));
                    }
                }
            });
            frame.stroke(
                &line,
                Stroke::default()
                    .with_width(1.5)
                    .with_color(Color::from_rgb(0.89, 0.23, 0.21)),
            );

            // Markers only when they stay distinguishable.
            if self.codes.len() <= 256 {
                for (i, &code) in self.codes.iter().enumerate() {
                    let x = margin + i as f32 * step;
                    let y =
                        margin + plot_height - ((code as f32 - bottom) / span) * plot_height;
                    let marker = Path::new(|builder| builder.circle(Point::new(x, y), 2.5));
                    frame.fill(&marker, Color::from_rgb(0.95, 0.45, 0.4));
                }
            }
        }

        vec![frame.into_geometry()]
    }
}
