// ABOUTME: Library root for the cheat.sh MCP server
// ABOUTME: Exposes protocol, dispatcher, tools, and transports for the binary and integration tests
//
// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 dravr.ai

pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;
