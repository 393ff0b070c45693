use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use edumap_client::{
    AssistantClient, ClientError, LiveDetails, PanelManager, RequestTag, TranscriptPolicy,
};
use edumap_core::registry::MarkerPopup;
use edumap_core::{
    Dataset, LatLng, MapConfig, MapSurface, MarkerId, MarkerRegistry, SearchFilter, Viewport,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Wrap,
        canvas::{Canvas, Points},
    },
};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Completions from spawned network tasks. Everything that touches view
/// state arrives here and is applied on the event loop, tagged so a reply
/// for an abandoned selection can be dropped.
#[derive(Debug)]
pub enum NetMessage {
    Live {
        tag: RequestTag,
        result: Result<LiveDetails, ClientError>,
    },
    Reply {
        tag: RequestTag,
        result: Result<String, ClientError>,
    },
}

/// Terminal implementation of the map surface: markers are glyphs painted
/// in geographic space, the viewport picks the canvas bounds.
#[derive(Default)]
pub struct CanvasSurface {
    next_id: u64,
    markers: Vec<(MarkerId, LatLng, MarkerPopup)>,
    viewport: Option<Viewport>,
}

impl CanvasSurface {
    pub fn markers(&self) -> &[(MarkerId, LatLng, MarkerPopup)] {
        &self.markers
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl MapSurface for CanvasSurface {
    fn place_marker(&mut self, position: LatLng, popup: MarkerPopup) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.push((id, position, popup));
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.retain(|(m, _, _)| *m != id);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Focus {
    Search,
    Map,
    Chat,
}

pub struct MapViewOptions {
    pub dataset: Dataset,
    pub config: MapConfig,
    pub api_url: String,
    pub transcript_policy: TranscriptPolicy,
}

/// State for the interactive map view: the dataset, the markers currently
/// on the surface, the search input, and the details panel with its chat.
pub struct MapView {
    dataset: Dataset,
    config: MapConfig,
    filter: SearchFilter,
    surface: CanvasSurface,
    registry: MarkerRegistry,
    panel: PanelManager,
    client: AssistantClient,
    runtime: Handle,
    tx: mpsc::UnboundedSender<NetMessage>,
    rx: mpsc::UnboundedReceiver<NetMessage>,
    search_input: String,
    chat_input: String,
    focus: Focus,
    selected: Option<usize>,
    shown: usize,
    should_quit: bool,
}

impl MapView {
    pub fn new(options: MapViewOptions) -> anyhow::Result<Self> {
        let client = AssistantClient::new(&options.api_url)?;
        let (tx, rx) = mpsc::unbounded_channel();

        let registry = MarkerRegistry::new(
            options.config.group_by,
            options.config.min_zoom,
            options.config.max_zoom,
        );

        let mut view = Self {
            dataset: options.dataset,
            config: options.config,
            filter: SearchFilter::default(),
            surface: CanvasSurface::default(),
            registry,
            panel: PanelManager::new(options.transcript_policy),
            client,
            runtime: Handle::current(),
            tx,
            rx,
            search_input: String::new(),
            chat_input: String::new(),
            focus: Focus::Search,
            selected: None,
            shown: 0,
            should_quit: false,
        };

        // Initial draw: the empty search term shows the whole dataset
        view.apply_search();
        Ok(view)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Drain completed network requests without blocking. Stale tags are
    /// filtered inside the panel manager.
    pub fn process_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                NetMessage::Live { tag, result } => self.panel.accept_live(&tag, result),
                NetMessage::Reply { tag, result } => self.panel.accept_reply(&tag, result),
            }
        }
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    fn apply_search(&mut self) {
        let hits = self.filter.filter(self.dataset.records(), &self.search_input);
        self.shown = hits.len();
        self.registry.redraw(&mut self.surface, hits);
        self.selected = None;
    }

    fn select_step(&mut self, delta: isize) {
        let count = self.surface.markers().len();
        if count == 0 {
            self.selected = None;
            return;
        }
        let next = match self.selected {
            None => 0,
            Some(i) => (i as isize + delta).rem_euclid(count as isize) as usize,
        };
        self.selected = Some(next);
    }

    /// Activate the selected marker: its popup action opens the details
    /// panel for exactly the record it was placed for.
    fn open_selected(&mut self) {
        let Some(idx) = self.selected else { return };
        let Some(&(id, _, _)) = self.surface.markers().get(idx) else {
            return;
        };
        let Some(record) = self.registry.record_for(id).cloned() else {
            return;
        };

        let tag = self.panel.open(record);
        self.request_live(tag);
        self.chat_input.clear();
        self.focus = Focus::Chat;
    }

    fn close_panel(&mut self) {
        self.panel.close();
        self.chat_input.clear();
        self.focus = Focus::Map;
    }

    fn submit_chat(&mut self) {
        // The input clears no matter what happens to the request
        let input = std::mem::take(&mut self.chat_input);
        if let Some((tag, query)) = self.panel.begin_chat(&input) {
            self.request_reply(tag, query);
        }
    }

    fn request_live(&self, tag: RequestTag) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let name = tag.inst_name().to_string();
        self.runtime.spawn(async move {
            let result = client.live_details(&name).await;
            let _ = tx.send(NetMessage::Live { tag, result });
        });
    }

    fn request_reply(&self, tag: RequestTag, query: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let name = tag.inst_name().to_string();
        self.runtime.spawn(async move {
            let result = client.ask(&query, &name).await;
            let _ = tx.send(NetMessage::Reply { tag, result });
        });
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.panel.is_open() {
                    self.close_panel();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Tab => self.cycle_focus(),
            _ => match self.focus {
                Focus::Search => self.handle_search_key(key.code),
                Focus::Map => self.handle_map_key(key.code),
                Focus::Chat => self.handle_chat_key(key.code),
            },
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Search => Focus::Map,
            Focus::Map if self.panel.is_open() => Focus::Chat,
            Focus::Map => Focus::Search,
            Focus::Chat => Focus::Search,
        };
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.search_input.push(c),
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Enter => self.apply_search(),
            _ => {}
        }
    }

    fn handle_map_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Up => self.select_step(-1),
            KeyCode::Right | KeyCode::Down => self.select_step(1),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('/') => self.focus = Focus::Search,
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.chat_input.push(c),
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Enter => self.submit_chat(),
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(5),    // Map (and panel)
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_search(f, chunks[0]);

        if self.panel.is_open() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);
            self.render_map(f, cols[0]);
            self.render_panel(f, cols[1]);
        } else {
            self.render_map(f, chunks[1]);
        }

        self.render_status(f, chunks[2]);
    }

    fn render_search(&self, f: &mut Frame, area: Rect) {
        let style = if self.focus == Focus::Search {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let search = Paragraph::new(self.search_input.as_str()).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search name, category or area "),
        );
        f.render_widget(search, area);

        if self.focus == Focus::Search {
            f.set_cursor_position((area.x + 1 + self.search_input.len() as u16, area.y + 1));
        }
    }

    fn render_map(&self, f: &mut Frame, area: Rect) {
        let viewport = self
            .surface
            .viewport()
            .unwrap_or_else(|| self.config.initial_viewport());
        let bounds = viewport.bounds();

        let coords: Vec<(f64, f64)> = self
            .surface
            .markers()
            .iter()
            .map(|(_, p, _)| (p.lng, p.lat))
            .collect();
        let selected = self.selected.and_then(|i| self.surface.markers().get(i));

        let title = format!(" {} ({} shown) ", self.config.attribution, self.shown);
        let border_style = if self.focus == Focus::Map {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style),
            )
            .x_bounds([bounds.min_lng, bounds.max_lng])
            .y_bounds([bounds.min_lat, bounds.max_lat])
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &coords,
                    color: Color::Yellow,
                });
                if let Some((_, position, popup)) = selected {
                    ctx.print(
                        position.lng,
                        position.lat,
                        Line::styled(
                            format!("◉ {}", popup.title),
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            });
        f.render_widget(canvas, area);
    }

    fn render_panel(&self, f: &mut Frame, area: Rect) {
        let Some(session) = self.panel.session() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(10), // Details
                Constraint::Min(3),     // Transcript
                Constraint::Length(3),  // Chat input
            ])
            .split(area);

        let record = session.record();
        let mut lines = vec![
            Line::from(Span::styled(
                record.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Category:  {}", record.category)),
            Line::from(format!("Area:      {}", record.area)),
            Line::from(format!("Ownership: {}", record.ownership)),
        ];
        if let Some(yoe) = record.year_established {
            lines.push(Line::from(format!("Established: {}", yoe)));
        }
        if let Some(ref url) = record.image_url {
            lines.push(Line::from(Span::styled(
                url.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        // Live attributes appear whenever their fetch resolves; a failed
        // fetch just leaves these lines out
        if let Some(live) = session.live() {
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "In Session:        {}",
                if live.in_session { "Yes" } else { "No" }
            )));
            lines.push(Line::from(format!(
                "Admission Ongoing: {}",
                if live.admission_ongoing { "Yes" } else { "No" }
            )));
            if let Some(ref vc) = live.vice_chancellor {
                lines.push(Line::from(format!("Vice Chancellor:   {}", vc)));
            }
        }

        let details = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Institution Details "));
        f.render_widget(details, chunks[0]);

        self.render_transcript(f, chunks[1], session.transcript());

        let input_style = if self.focus == Focus::Chat {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let chat_input = Paragraph::new(self.chat_input.as_str())
            .style(input_style)
            .block(Block::default().borders(Borders::ALL).title(" Ask the assistant "));
        f.render_widget(chat_input, chunks[2]);

        if self.focus == Focus::Chat {
            f.set_cursor_position((
                chunks[2].x + 1 + self.chat_input.len() as u16,
                chunks[2].y + 1,
            ));
        }
    }

    fn render_transcript(&self, f: &mut Frame, area: Rect, transcript: &[edumap_client::ChatMessage]) {
        let height = area.height.saturating_sub(2) as usize;

        // Tail the transcript; one message per line is close enough for the
        // panel width
        let visible = transcript
            .iter()
            .rev()
            .take(height.max(1))
            .rev();

        let lines: Vec<Line> = visible
            .map(|msg| match msg.role {
                edumap_client::ChatRole::User => Line::from(vec![
                    Span::styled("You: ", Style::default().fg(Color::Yellow)),
                    Span::raw(msg.text.clone()),
                ]),
                edumap_client::ChatRole::Assistant => Line::from(vec![
                    Span::styled("AI:  ", Style::default().fg(Color::Green)),
                    Span::raw(msg.text.clone()),
                ]),
            })
            .collect();

        let transcript_widget = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Chat "));
        f.render_widget(transcript_widget, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let status = Paragraph::new(Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" focus | "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" search/open/send | "),
            Span::styled("←→", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" markers | "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" close/quit | "),
            Span::raw(format!(
                "{} of {} institutions",
                self.shown,
                self.dataset.len()
            )),
        ]))
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(status, area);
    }
}
