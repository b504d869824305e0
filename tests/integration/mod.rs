// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

mod api_test;
mod job_tracker_test;
mod newsletter_test;
mod repositories_test;
mod youtube_monitor_test;
